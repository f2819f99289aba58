//! A small HTTP/1.0 server for static files and CGI programs.
//!
//! Each accepted connection carries exactly one request. `GET` and `HEAD`
//! are served from a document root; URIs containing the CGI marker
//! (`cgi-bin` by default) run the named program with `QUERY_STRING` set
//! and stream its standard output back to the client.

pub mod config;
pub mod handler;
pub mod http;
pub mod net;

pub use handler::handle_connection;
