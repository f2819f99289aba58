#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,

    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    UriTooLong = 414,

    NotImplemented = 501,
}

impl HttpStatus {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn reason(self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",                           // 200
            HttpStatus::BadRequest => "Bad Request",          // 400
            HttpStatus::Forbidden => "Forbidden",             // 403
            HttpStatus::NotFound => "Not Found",              // 404
            HttpStatus::UriTooLong => "URI Too Long",         // 414
            HttpStatus::NotImplemented => "Not Implemented",  // 501
        }
    }
}
