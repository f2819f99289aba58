pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod validator;

/// Methods the server tells apart. Anything that is not `GET` or `HEAD`
/// is kept verbatim so it can be reported back to the client.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum HttpMethod {
    Get,
    Head,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Other(m) => m,
        }
    }
}

/// Method tokens are compared case-insensitively.
pub fn http_method_from_str(method: &str) -> HttpMethod {
    if method.eq_ignore_ascii_case("GET") {
        HttpMethod::Get
    } else if method.eq_ignore_ascii_case("HEAD") {
        HttpMethod::Head
    } else {
        HttpMethod::Other(method.to_string())
    }
}

/// Version token that makes the `Host` header mandatory.
pub const HTTP_1_1: &str = "HTTP/1.1";

pub fn is_http_1_1(version: &str) -> bool {
    version.eq_ignore_ascii_case(HTTP_1_1)
}
