use std::time::SystemTime;

use async_std::fs::File;
use async_std::io::{self, ReadExt, Write, WriteExt};
use async_std::path::Path;

use crate::handler::filetype::get_filetype;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

/// What the static server needs to know about the file, taken from one `stat`.
#[derive(Debug, Clone, Copy)]
pub struct StaticFile {
    pub size: u64,
    pub modified: Option<SystemTime>,
}

pub fn build_head(name: &str, file: &StaticFile, server_name: &str) -> HttpResponse {
    let mut res = HttpResponse::new(HttpStatus::Ok);
    res.set_header(ResponseHeader::Server, server_name);
    res.set_header(ResponseHeader::Connection, "close");
    res.set_header(ResponseHeader::ContentLength, &file.size.to_string());
    res.set_header(ResponseHeader::ContentType, get_filetype(name));
    if let Some(modified) = file.modified {
        res.set_header(ResponseHeader::LastModified, &httpdate::fmt_http_date(modified));
    }
    res
}

/// Writes a `200 OK` head for the file at `full_path` and, unless `is_head`,
/// exactly `file.size` bytes of its contents.
///
/// `name` is the request-relative path used to pick the `Content-type`.
/// The file handle is dropped on every return path.
pub async fn serve<W>(
    writer: &mut W,
    full_path: &Path,
    name: &str,
    file: &StaticFile,
    is_head: bool,
    server_name: &str,
) -> io::Result<()>
where
    W: Write + Unpin + ?Sized,
{
    let head = build_head(name, file, server_name);
    writer.write_all(head.build_headers().as_bytes()).await?;
    log::debug!("response headers for {}: {:?}", name, head.headers);

    if is_head {
        return writer.flush().await;
    }

    let src = File::open(full_path).await?;
    let sent = io::copy(&mut src.take(file.size), &mut *writer).await?;
    if sent < file.size {
        log::warn!("{} shrank while sending: {} of {} bytes", name, sent, file.size);
    }

    writer.flush().await
}
