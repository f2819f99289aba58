use async_std::io::{self, Write, WriteExt};

use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

/// Every response is framed as HTTP/1.0, whatever version the client declared.
pub const RESPONSE_VERSION: &str = "HTTP/1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHeader {
    Server,
    Connection,
    ContentLength,
    ContentType,
    LastModified,
}

impl ResponseHeader {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseHeader::Server => "Server",
            ResponseHeader::Connection => "Connection",
            ResponseHeader::ContentLength => "Content-length",
            ResponseHeader::ContentType => "Content-type",
            ResponseHeader::LastModified => "Last-modified",
        }
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: HttpStatus,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: HttpStatus) -> Self {
        Self {
            status,
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        self.headers.set_raw(h.as_str(), value);
    }

    /// Status line and headers, without the blank line that ends the head.
    ///
    /// Used as-is when another party (a CGI program) finishes the head itself.
    pub fn build_partial_head(&self) -> String {
        // HTTP/1.0 <status> <reason>\r\n
        // <header_name>: <header_value>\r\n
        // ...
        format!(
            "{} {} {}\r\n{}",
            RESPONSE_VERSION,
            self.status.code(),
            self.status.reason(),
            self.headers.stringify(),
        )
    }

    /// Complete head: status line, headers and the terminating blank line.
    pub fn build_headers(&self) -> String {
        let mut head = self.build_partial_head();
        head.push_str("\r\n");
        head
    }

    /// Serializes the head followed by the in-memory body.
    pub async fn write_to<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write + Unpin + ?Sized,
    {
        writer.write_all(self.build_headers().as_bytes()).await?;
        writer.write_all(&self.body).await?;
        writer.flush().await
    }
}
