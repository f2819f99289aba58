//! Per-connection request handling.
//!
//! [`handle_connection`] runs exactly one request/response cycle:
//!
//! 1. read and tokenize the request line
//! 2. reject methods other than `GET`/`HEAD` (501)
//! 3. consume the header lines, noting `Host`, and reject HTTP/1.1 requests
//!    without it (400)
//! 4. resolve the URI to a path under the document root
//! 5. `stat` it (404) and check file type and owner permission bits (403)
//! 6. serve the file, or run the CGI program
//!
//! Every rejection is terminal for the request and answered with a complete
//! HTML error page. Failures after a `200` head has gone out cannot be
//! reported to the client and are returned as [`ServeError`] instead.

pub mod cgi;
pub mod error;
pub mod filetype;
pub mod responses;
pub mod static_files;
pub mod uri;

use std::os::unix::fs::PermissionsExt;

use async_std::fs;
use async_std::io::{BufRead, ErrorKind, Write};
use async_std::path::Path;

use crate::config::ServerConfig;
use crate::handler::error::{ClientError, ResourceError, ServeError};
use crate::handler::static_files::StaticFile;
use crate::handler::uri::{ResolvedResource, UriResolver};
use crate::http::parser::{Parser, ReadError};
use crate::http::request::HttpRequest;
use crate::http::validator::Validator;

const OWNER_READ: u32 = 0o400;
const OWNER_EXECUTE: u32 = 0o100;

pub async fn handle_connection<R, W>(
    reader: &mut R,
    writer: &mut W,
    cfg: &ServerConfig,
) -> Result<(), ServeError>
where
    R: BufRead + Unpin + ?Sized,
    W: Write + Unpin + ?Sized,
{
    let mut parser = Parser::new(reader, cfg.max_line_size, cfg.read_timeout);

    let mut req = match parser.read_request_line().await {
        Ok(req) => req,
        Err(ReadError::ConnectionClosed) => return Ok(()),
        Err(ReadError::Io(err)) => return Err(err.into()),
        Err(ReadError::Parser(err)) => return reject(writer, err.into(), cfg).await,
    };

    if let Err(err) = Validator::validate_method(&req) {
        return reject(writer, err.into(), cfg).await;
    }

    if req.is_http_1_1() {
        match parser.scan_headers(&mut req).await {
            Ok(()) => {}
            Err(ReadError::Parser(err)) => return reject(writer, err.into(), cfg).await,
            Err(ReadError::Io(err)) => return Err(err.into()),
            Err(ReadError::ConnectionClosed) => return Ok(()),
        }
    } else if !cfg.legacy_framing {
        // Draining is best effort: a client that never ends its head is still served.
        match parser.scan_headers(&mut req).await {
            Ok(()) => {}
            Err(ReadError::Io(err)) if err.kind() != ErrorKind::TimedOut => {
                return Err(err.into());
            }
            Err(err) => log::debug!("{} header drain stopped: {}", req.version, err),
        }
    }

    if let Err(err) = Validator::validate_host(&req) {
        return reject(writer, err.into(), cfg).await;
    }

    let resource = UriResolver::new(&cfg.cgi_marker, &cfg.index_file).resolve(&req.uri);
    log::debug!("{} resolved to {:?}", req.uri, resource);

    match serve_resource(writer, &req, &resource, cfg).await {
        Ok(()) => Ok(()),
        Err(RequestOutcome::Rejected(err)) => reject(writer, err.into(), cfg).await,
        Err(RequestOutcome::Failed(err)) => Err(err),
    }
}

enum RequestOutcome {
    Rejected(ResourceError),
    Failed(ServeError),
}

impl From<ServeError> for RequestOutcome {
    fn from(err: ServeError) -> Self {
        RequestOutcome::Failed(err)
    }
}

async fn serve_resource<W>(
    writer: &mut W,
    req: &HttpRequest,
    resource: &ResolvedResource,
    cfg: &ServerConfig,
) -> Result<(), RequestOutcome>
where
    W: Write + Unpin + ?Sized,
{
    let full_path = cfg.document_root.join(&resource.path);
    let full_path = Path::new(&full_path);
    let meta = fs::metadata(full_path)
        .await
        .map_err(|_| RequestOutcome::Rejected(ResourceError::NotFound(resource.path.clone())))?;
    let mode = meta.permissions().mode();

    if resource.is_dynamic {
        if !meta.is_file() || mode & OWNER_EXECUTE == 0 {
            return Err(RequestOutcome::Rejected(ResourceError::NotExecutable(
                resource.path.clone(),
            )));
        }

        log::info!("{} {} -> 200 (cgi)", req.method.as_str(), req.uri);
        cgi::serve(
            writer,
            full_path,
            &resource.path,
            &resource.query_args,
            &cfg.server_name,
            cfg.cgi_timeout,
        )
        .await?;
    } else {
        if !meta.is_file() || mode & OWNER_READ == 0 {
            return Err(RequestOutcome::Rejected(ResourceError::Unreadable(
                resource.path.clone(),
            )));
        }

        let file = StaticFile {
            size: meta.len(),
            modified: meta.modified().ok(),
        };
        log::info!("{} {} -> 200 ({} bytes)", req.method.as_str(), req.uri, file.size);
        static_files::serve(
            writer,
            full_path,
            &resource.path,
            &file,
            req.is_head(),
            &cfg.server_name,
        )
        .await
        .map_err(ServeError::from)?;
    }

    Ok(())
}

async fn reject<W>(writer: &mut W, err: ClientError, cfg: &ServerConfig) -> Result<(), ServeError>
where
    W: Write + Unpin + ?Sized,
{
    responses::client_error(writer, &err, &cfg.server_name).await?;
    Ok(())
}
