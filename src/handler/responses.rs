use async_std::io::{self, Write};

use crate::handler::error::ClientError;
use crate::http::response::{HttpResponse, ResponseHeader};

/// Renders the HTML error page for `err`.
///
/// Only `Content-type` and `Content-length` are set; the length is the exact
/// byte length of the generated body.
pub fn error_page(err: &ClientError, server_name: &str) -> HttpResponse {
    let mut res = HttpResponse::new(err.status);
    let body = format!(
        "<html><title>Tiny Error</title><body bgcolor=ffffff>\r\n\
         {}: {}\r\n\
         <p>{}: {}\r\n\
         <hr><em>{}</em>\r\n",
        err.status.code(),
        err.status.reason(),
        err.long_msg,
        err.cause,
        server_name,
    )
    .into_bytes();

    res.set_header(ResponseHeader::ContentType, "text/html");
    res.set_header(ResponseHeader::ContentLength, &body.len().to_string());

    res.body = body;
    res
}

/// Sends a complete error response for `err`.
pub async fn client_error<W>(writer: &mut W, err: &ClientError, server_name: &str) -> io::Result<()>
where
    W: Write + Unpin + ?Sized,
{
    log::info!("{} {}: {}", err.status.code(), err.status.reason(), err.cause);
    error_page(err, server_name).write_to(writer).await
}
