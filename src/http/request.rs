use crate::http::{HttpMethod, http_method_from_str, is_http_1_1};

/// One parsed request: the request line plus what the header scan found.
///
/// Lives only for the duration of a single request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub version: String,

    /// Value of the first `Host` header seen, if headers were scanned.
    pub host: Option<String>,
}

impl HttpRequest {
    pub fn new(method: &str, uri: &str, version: &str) -> Self {
        Self {
            method: http_method_from_str(method),
            uri: uri.to_string(),
            version: version.to_string(),
            host: None,
        }
    }

    pub fn is_head(&self) -> bool {
        self.method == HttpMethod::Head
    }

    pub fn is_http_1_1(&self) -> bool {
        is_http_1_1(&self.version)
    }
}
