use thiserror::Error;

use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

/// Request-level policy violations, detected before any file access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("method {0} is not implemented")]
    NotImplemented(String),

    #[error("{0} request without a Host header")]
    MissingHost(String),
}

impl ValidatorError {
    pub fn into_http_status(&self) -> HttpStatus {
        match self {
            ValidatorError::NotImplemented(_) => HttpStatus::NotImplemented,
            ValidatorError::MissingHost(_) => HttpStatus::BadRequest,
        }
    }
}

pub struct Validator;

impl Validator {
    /// Only `GET` and `HEAD` are served.
    pub fn validate_method(req: &HttpRequest) -> Result<(), ValidatorError> {
        match &req.method {
            HttpMethod::Get | HttpMethod::Head => Ok(()),
            HttpMethod::Other(m) => Err(ValidatorError::NotImplemented(m.clone())),
        }
    }

    /// HTTP/1.1 requests must carry a `Host` header; other versions are not checked.
    pub fn validate_host(req: &HttpRequest) -> Result<(), ValidatorError> {
        if req.is_http_1_1() && req.host.is_none() {
            return Err(ValidatorError::MissingHost(req.version.clone()));
        }
        Ok(())
    }
}
