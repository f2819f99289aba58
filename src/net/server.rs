//! Socket runtime around the request engine.
//!
//! This module is responsible only for networking concerns:
//! - binding the listening socket,
//! - accepting TCP connections,
//! - handing each connection to [`handler::handle_connection`](crate::handler::handle_connection)
//!   and closing it once the single request/response cycle is over.
//!
//! Each connection runs in its own `async-std` task, so a failure while
//! serving one client is logged and never reaches the accept loop.

use std::net::SocketAddr;

use async_std::io::BufReader;
use async_std::net::{TcpListener, TcpStream};
use async_std::task;

use crate::config::ServerConfig;
use crate::handler;

pub struct Server {
    listener: TcpListener,
    config: &'static ServerConfig,
}

impl Server {
    /// Binds to the configured address and port.
    pub async fn bind(config: &'static ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind((config.address, config.port)).await?;
        Ok(Self { listener, config })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, spawning a task per client.
    pub async fn run(&self) -> std::io::Result<()> {
        log::info!(
            "Listening on {} (document root {})",
            self.local_addr()?,
            self.config.document_root.display()
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    log::info!("Accepted connection from {}", addr);
                    task::spawn(Self::handle_client(stream, addr, self.config));
                }
                Err(err) => log::warn!("accept failed: {}", err),
            }
        }
    }

    /// Runs one request/response cycle on `stream`, then drops it, closing the socket.
    async fn handle_client(stream: TcpStream, addr: SocketAddr, config: &'static ServerConfig) {
        let mut reader = BufReader::new(&stream);
        let mut writer = &stream;

        if let Err(err) = handler::handle_connection(&mut reader, &mut writer, config).await {
            log::error!("Connection with {} aborted: {}", addr, err);
        }
    }
}
