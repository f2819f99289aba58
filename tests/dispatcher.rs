mod common;

use common::{DocRoot, exchange, request, split_response, status_line};

fn home_page() -> Vec<u8> {
    let mut page = b"<html>Hi</html>".to_vec();
    page.resize(42, b' ');
    page
}

#[async_std::test]
async fn get_returns_exact_file_bytes() {
    let root = DocRoot::new("get");
    root.write("home.html", &home_page(), 0o644);

    let out = request(b"GET /home.html HTTP/1.0\r\n\r\n", &root.config()).await;
    let (head, body) = split_response(&out);

    assert!(head.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(head.contains("Server: Tiny Web Server\r\n"));
    assert!(head.contains("Connection: close\r\n"));
    assert!(head.contains("Content-length: 42\r\n"));
    assert!(head.contains("Content-type: text/html\r\n"));
    assert_eq!(body, home_page());
}

#[async_std::test]
async fn head_sends_same_headers_without_body() {
    let root = DocRoot::new("head");
    root.write("home.html", &home_page(), 0o644);
    let cfg = root.config();

    let get = request(b"GET /home.html HTTP/1.0\r\n\r\n", &cfg).await;
    let head = request(b"HEAD /home.html HTTP/1.0\r\n\r\n", &cfg).await;

    let (get_head, _) = split_response(&get);
    let (head_head, head_body) = split_response(&head);
    assert_eq!(get_head, head_head);
    assert!(head_body.is_empty());
}

#[async_std::test]
async fn trailing_slash_serves_index() {
    let root = DocRoot::new("index");
    root.write("home.html", b"root", 0o644);
    root.write("docs/home.html", b"docs", 0o644);
    let cfg = root.config();

    let (_, body) = split_response(&request(b"GET / HTTP/1.0\r\n\r\n", &cfg).await);
    assert_eq!(body, b"root");

    let (_, body) = split_response(&request(b"GET /docs/ HTTP/1.0\r\n\r\n", &cfg).await);
    assert_eq!(body, b"docs");
}

#[async_std::test]
async fn content_type_follows_extension() {
    let root = DocRoot::new("mime");
    root.write("logo.gif", b"GIF89a", 0o644);
    root.write("notes", b"plain", 0o644);
    let cfg = root.config();

    let (head, _) = split_response(&request(b"GET /logo.gif HTTP/1.0\r\n\r\n", &cfg).await);
    assert!(head.contains("Content-type: image/gif\r\n"));

    let (head, _) = split_response(&request(b"GET /notes HTTP/1.0\r\n\r\n", &cfg).await);
    assert!(head.contains("Content-type: text/plain\r\n"));
}

#[async_std::test]
async fn missing_file_is_404_with_path_in_body() {
    let root = DocRoot::new("404");

    let out = request(b"GET /nothing.html HTTP/1.0\r\n\r\n", &root.config()).await;
    let (head, body) = split_response(&out);

    assert_eq!(status_line(&out), "HTTP/1.0 404 Not Found");
    assert!(head.contains("Content-type: text/html\r\n"));
    assert!(head.contains(&format!("Content-length: {}\r\n", body.len())));
    assert!(String::from_utf8(body).unwrap().contains("./nothing.html"));
}

#[async_std::test]
async fn unreadable_static_file_is_403() {
    let root = DocRoot::new("403-static");
    root.write("secret.html", b"hidden", 0o200);

    let out = request(b"GET /secret.html HTTP/1.0\r\n\r\n", &root.config()).await;
    assert_eq!(status_line(&out), "HTTP/1.0 403 Forbidden");
}

#[async_std::test]
async fn directory_is_403() {
    let root = DocRoot::new("403-dir");
    root.mkdir("sub");

    let out = request(b"GET /sub HTTP/1.0\r\n\r\n", &root.config()).await;
    assert_eq!(status_line(&out), "HTTP/1.0 403 Forbidden");
}

#[async_std::test]
async fn non_executable_cgi_is_403() {
    let root = DocRoot::new("403-cgi");
    root.write("cgi-bin/adder", b"#!/bin/sh\necho hi\n", 0o644);

    let out = request(b"GET /cgi-bin/adder?1&2 HTTP/1.0\r\n\r\n", &root.config()).await;
    let (_, body) = split_response(&out);

    assert_eq!(status_line(&out), "HTTP/1.0 403 Forbidden");
    assert!(String::from_utf8(body).unwrap().contains("Couldn't run the CGI program"));
}

#[async_std::test]
async fn unsupported_method_is_501_before_file_access() {
    let root = DocRoot::new("501");

    let out = request(b"POST /does-not-exist.html HTTP/1.0\r\n\r\n", &root.config()).await;
    let (_, body) = split_response(&out);

    assert_eq!(status_line(&out), "HTTP/1.0 501 Not Implemented");
    assert!(String::from_utf8(body).unwrap().contains("POST"));
}

#[async_std::test]
async fn http_1_1_requires_host() {
    let root = DocRoot::new("host");
    root.write("home.html", b"hello", 0o644);
    let cfg = root.config();

    let out = request(b"GET /home.html HTTP/1.1\r\nAccept: */*\r\n\r\n", &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 400 Bad Request");

    let out = request(b"GET /home.html http/1.1\r\nhost: localhost\r\n\r\n", &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 200 OK");
    let (_, body) = split_response(&out);
    assert_eq!(body, b"hello");
}

#[async_std::test]
async fn http_1_0_does_not_need_host() {
    let root = DocRoot::new("no-host");
    root.write("home.html", b"hello", 0o644);

    let out = request(b"GET /home.html HTTP/1.0\r\nAccept: */*\r\n\r\n", &root.config()).await;
    assert_eq!(status_line(&out), "HTTP/1.0 200 OK");
}

#[async_std::test]
async fn malformed_request_line_is_400() {
    let root = DocRoot::new("malformed");

    let out = request(b"GET /\r\n\r\n", &root.config()).await;
    assert_eq!(status_line(&out), "HTTP/1.0 400 Bad Request");
}

#[async_std::test]
async fn overlong_request_line_is_414() {
    let root = DocRoot::new("long");
    let mut cfg = root.config();
    cfg.max_line_size = 32;

    let raw = format!("GET /{} HTTP/1.0\r\n\r\n", "a".repeat(64));
    let out = request(raw.as_bytes(), &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 414 URI Too Long");
}

#[async_std::test]
async fn empty_connection_gets_no_response() {
    let root = DocRoot::new("empty");

    let (out, result) = exchange(b"", &root.config()).await;
    assert!(result.is_ok());
    assert!(out.is_empty());
}

#[async_std::test]
async fn headers_are_consumed_for_http_1_0() {
    let root = DocRoot::new("framing");
    root.write("home.html", b"x", 0o644);
    let cfg = root.config();

    let mut reader: &[u8] = b"GET /home.html HTTP/1.0\r\nUser-Agent: t\r\n\r\nNEXT";
    let mut out = Vec::new();
    tinynet::handle_connection(&mut reader, &mut out, &cfg).await.unwrap();
    assert_eq!(reader, b"NEXT");
}

#[async_std::test]
async fn legacy_framing_leaves_http_1_0_headers_unread() {
    let root = DocRoot::new("legacy");
    root.write("home.html", b"x", 0o644);
    let mut cfg = root.config();
    cfg.legacy_framing = true;

    let mut reader: &[u8] = b"GET /home.html HTTP/1.0\r\nUser-Agent: t\r\n\r\n";
    let mut out = Vec::new();
    tinynet::handle_connection(&mut reader, &mut out, &cfg).await.unwrap();

    assert_eq!(status_line(&out), "HTTP/1.0 200 OK");
    assert_eq!(reader, b"User-Agent: t\r\n\r\n");

    let mut reader: &[u8] = b"GET /home.html HTTP/1.1\r\nHost: h\r\n\r\n";
    let mut out = Vec::new();
    tinynet::handle_connection(&mut reader, &mut out, &cfg).await.unwrap();
    assert_eq!(status_line(&out), "HTTP/1.0 200 OK");
    assert!(reader.is_empty());
}

#[async_std::test]
async fn unsupported_method_wins_over_bad_headers() {
    let root = DocRoot::new("501-long-header");
    let mut cfg = root.config();
    cfg.max_line_size = 32;

    let raw = format!("POST / HTTP/1.0\r\nX-Long: {}\r\n\r\n", "b".repeat(64));
    let out = request(raw.as_bytes(), &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 501 Not Implemented");

    let raw = format!("POST / HTTP/1.1\r\nX-Long: {}\r\n\r\n", "b".repeat(64));
    let out = request(raw.as_bytes(), &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 501 Not Implemented");
}

#[async_std::test]
async fn http_1_0_header_drain_is_best_effort() {
    let root = DocRoot::new("drain");
    root.write("home.html", b"hello", 0o644);
    let mut cfg = root.config();
    cfg.max_line_size = 32;

    let raw = format!("GET /home.html HTTP/1.0\r\nX-Long: {}\r\n\r\n", "b".repeat(64));
    let out = request(raw.as_bytes(), &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 200 OK");

    let raw = format!("GET /home.html HTTP/1.1\r\nX-Long: {}\r\n\r\n", "b".repeat(64));
    let out = request(raw.as_bytes(), &cfg).await;
    assert_eq!(status_line(&out), "HTTP/1.0 400 Bad Request");
}
