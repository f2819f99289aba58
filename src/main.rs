use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use tinynet::config::{ServerConfig, config, set_config};
use tinynet::net::server::Server;

/// Serve static files and CGI programs over HTTP/1.0.
#[derive(Debug, Parser)]
#[command(name = "tinynet", version)]
struct Cli {
    /// Port to listen on
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Document root that request paths are resolved against
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    address: Option<IpAddr>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut cfg = match &self.config {
            Some(path) => ServerConfig::from_file(path),
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(root) = self.root {
            cfg.document_root = root;
        }
        if let Some(address) = self.address {
            cfg.address = address;
        }
        cfg
    }
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    set_config(Cli::parse().into_config());

    async_std::task::block_on(async {
        let server = Server::bind(config()).await?;
        server.run().await
    })
}
