use async_std::io;
use thiserror::Error;

use crate::http::parser::ParserError;
use crate::http::status::HttpStatus;
use crate::http::validator::ValidatorError;

/// Filesystem conditions that stop a request before anything is served.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is not a readable regular file")]
    Unreadable(String),

    #[error("{0} is not an executable regular file")]
    NotExecutable(String),
}

impl ResourceError {
    pub fn into_http_status(&self) -> HttpStatus {
        match self {
            ResourceError::NotFound(_) => HttpStatus::NotFound,
            ResourceError::Unreadable(_) | ResourceError::NotExecutable(_) => {
                HttpStatus::Forbidden
            }
        }
    }
}

/// Failures after the response has started, or on the transport itself.
/// Nothing more can be sent to the client; the connection is dropped.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to spawn {path}: {source}")]
    Spawn { path: String, source: io::Error },

    #[error("{path} did not finish within {secs:.1}s")]
    CgiTimeout { path: String, secs: f64 },
}

/// Everything the error page needs: the status plus what went wrong and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub status: HttpStatus,
    pub long_msg: &'static str,
    pub cause: String,
}

impl From<ParserError> for ClientError {
    fn from(err: ParserError) -> Self {
        let status = err.into_http_status();
        let (long_msg, cause) = match err {
            ParserError::MalformedRequestLine(line) => ("Malformed request line", line),
            ParserError::RequestLineTooLong(max) => {
                ("Request line too long", format!("limit is {} bytes", max))
            }
            ParserError::HeaderLineTooLong(max) => {
                ("Header line too long", format!("limit is {} bytes", max))
            }
        };
        Self {
            status,
            long_msg,
            cause,
        }
    }
}

impl From<ValidatorError> for ClientError {
    fn from(err: ValidatorError) -> Self {
        let status = err.into_http_status();
        let (long_msg, cause) = match err {
            ValidatorError::NotImplemented(method) => {
                ("Server does not implement this method", method)
            }
            ValidatorError::MissingHost(version) => ("Missing Host header", version),
        };
        Self {
            status,
            long_msg,
            cause,
        }
    }
}

impl From<ResourceError> for ClientError {
    fn from(err: ResourceError) -> Self {
        let status = err.into_http_status();
        let (long_msg, cause) = match err {
            ResourceError::NotFound(path) => ("Couldn't find this file", path),
            ResourceError::Unreadable(path) => ("Couldn't read the file", path),
            ResourceError::NotExecutable(path) => ("Couldn't run the CGI program", path),
        };
        Self {
            status,
            long_msg,
            cause,
        }
    }
}
