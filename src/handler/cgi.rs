//! Runs a CGI program and forwards its standard output as the response body.
//!
//! The server writes the status line and its `Server` header, then the
//! program's stdout is relayed verbatim, so the program itself is expected to
//! finish the head (`Content-type: ...\r\n\r\n`) before writing its body.
//!
//! The program is started without arguments. Its environment is the server's
//! own plus `QUERY_STRING`, passed to the spawn call rather than set on the
//! server process. The child is created with `kill_on_drop`, so any early
//! return kills it and leaves it to be reaped.

use std::time::Duration;

use async_std::future;
use async_std::io::{self, Write, WriteExt};
use async_std::path::Path;
use async_std::process::{Command, ExitStatus, Stdio};

use crate::handler::error::ServeError;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

pub const QUERY_STRING: &str = "QUERY_STRING";

pub fn build_preamble(server_name: &str) -> HttpResponse {
    let mut res = HttpResponse::new(HttpStatus::Ok);
    res.set_header(ResponseHeader::Server, server_name);
    res
}

/// Executes `program` and blocks the request until it has exited and its
/// stdout pipe has reached end-of-file. A background process that inherits
/// stdout therefore keeps the request open until it exits too.
///
/// With `timeout` set, a program still running at the deadline is killed,
/// reaped and reported as [`ServeError::CgiTimeout`].
pub async fn serve<W>(
    writer: &mut W,
    program: &Path,
    name: &str,
    query_args: &str,
    server_name: &str,
    timeout: Option<Duration>,
) -> Result<(), ServeError>
where
    W: Write + Unpin + ?Sized,
{
    let preamble = build_preamble(server_name);
    writer.write_all(preamble.build_partial_head().as_bytes()).await?;
    writer.flush().await?;

    let mut child = Command::new(program)
        .env(QUERY_STRING, query_args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ServeError::Spawn {
            path: name.to_string(),
            source,
        })?;
    log::debug!("spawned {} (pid {}) with {}={:?}", name, child.id(), QUERY_STRING, query_args);

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;

    let relay = async {
        io::copy(&mut stdout, &mut *writer).await?;
        writer.flush().await?;
        child.status().await
    };

    let status: ExitStatus = match timeout {
        None => relay.await?,
        Some(limit) => {
            let outcome = future::timeout(limit, relay).await;
            match outcome {
                Ok(status) => status?,
                Err(_) => {
                    log::warn!("{} exceeded {:?}, killing it", name, limit);
                    // The program may already have exited while a descendant holds stdout.
                    if let Err(err) = child.kill() {
                        log::debug!("kill {}: {}", name, err);
                    }
                    child.status().await?;
                    return Err(ServeError::CgiTimeout {
                        path: name.to_string(),
                        secs: limit.as_secs_f64(),
                    });
                }
            }
        }
    };

    if !status.success() {
        log::warn!("{} exited with {}", name, status);
    }
    Ok(())
}
