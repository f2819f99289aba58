//! Line-oriented reader for the request head.
//!
//! The server only ever needs two things from a client: the request line and,
//! for HTTP/1.1, whether a `Host` header is present. [`Parser`] reads both from
//! any buffered async reader, one CRLF-terminated line at a time, bounding each
//! line by `max_line_size` and each read by `read_timeout`.

use std::time::Duration;

use async_std::io::{self, BufRead, BufReadExt, ReadExt};
use thiserror::Error;

use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

/// Client mistakes found while reading the head. Mapped to a status later so
/// that the parser stays independent of response generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("malformed request line {0:?}")]
    MalformedRequestLine(String),

    #[error("request line exceeds {0} bytes")]
    RequestLineTooLong(usize),

    #[error("header line exceeds {0} bytes")]
    HeaderLineTooLong(usize),
}

impl ParserError {
    pub fn into_http_status(&self) -> HttpStatus {
        match self {
            ParserError::MalformedRequestLine(_) => HttpStatus::BadRequest,
            ParserError::RequestLineTooLong(_) => HttpStatus::UriTooLong,
            ParserError::HeaderLineTooLong(_) => HttpStatus::BadRequest,
        }
    }
}

/// Errors that interrupt reading a request from the stream.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("i/o error while reading request: {0}")]
    Io(#[from] io::Error),

    #[error("connection closed before a request line was received")]
    ConnectionClosed,

    #[error(transparent)]
    Parser(#[from] ParserError),
}

#[derive(Clone, Copy)]
enum LineKind {
    RequestLine,
    Header,
}

pub struct Parser<'a, R: ?Sized> {
    reader: &'a mut R,
    max_line_size: usize,
    read_timeout: Duration,
}

impl<'a, R> Parser<'a, R>
where
    R: BufRead + Unpin + ?Sized,
{
    pub fn new(reader: &'a mut R, max_line_size: usize, read_timeout: Duration) -> Self {
        Self {
            reader,
            max_line_size,
            read_timeout,
        }
    }

    /// Reads one line including its terminator. `None` means EOF before any byte.
    async fn read_line(&mut self, kind: LineKind) -> Result<Option<Vec<u8>>, ReadError> {
        let mut line = Vec::new();
        let mut limited = (&mut *self.reader).take(self.max_line_size as u64);
        let n = io::timeout(self.read_timeout, limited.read_until(b'\n', &mut line)).await?;

        if n == 0 {
            return Ok(None);
        }

        if n >= self.max_line_size && !line.ends_with(b"\n") {
            let err = match kind {
                LineKind::RequestLine => ParserError::RequestLineTooLong(self.max_line_size),
                LineKind::Header => ParserError::HeaderLineTooLong(self.max_line_size),
            };
            return Err(err.into());
        }

        Ok(Some(line))
    }

    /// Reads the request line and splits it into method, URI and version.
    ///
    /// Tokens are whitespace-delimited; anything after the third token is ignored.
    pub async fn read_request_line(&mut self) -> Result<HttpRequest, ReadError> {
        let line = match self.read_line(LineKind::RequestLine).await? {
            Some(line) => line,
            None => return Err(ReadError::ConnectionClosed),
        };

        let line = String::from_utf8_lossy(&line);
        log::debug!("request line: {:?}", line);
        parse_request_line(&line).map_err(ReadError::Parser)
    }

    /// Consumes header lines up to the blank line, recording the `Host` value.
    ///
    /// EOF ends the scan as if the blank line had been read.
    pub async fn scan_headers(&mut self, req: &mut HttpRequest) -> Result<(), ReadError> {
        while let Some(line) = self.read_line(LineKind::Header).await? {
            let line = trim_line_ending(&line);
            if line.is_empty() {
                break;
            }

            if req.host.is_none() {
                req.host = host_header_value(line);
            }
        }

        log::debug!("header scan done, host: {:?}", req.host);
        Ok(())
    }
}

pub fn parse_request_line(line: &str) -> Result<HttpRequest, ParserError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(uri), Some(version)) => Ok(HttpRequest::new(method, uri, version)),
        _ => Err(ParserError::MalformedRequestLine(line.trim_end().to_string())),
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Case-insensitive prefix match on `Host:`.
fn host_header_value(line: &[u8]) -> Option<String> {
    const PREFIX: &[u8] = b"host:";
    if line.len() < PREFIX.len() || !line[..PREFIX.len()].eq_ignore_ascii_case(PREFIX) {
        return None;
    }

    let value = String::from_utf8_lossy(&line[PREFIX.len()..]);
    Some(value.trim().to_string())
}
