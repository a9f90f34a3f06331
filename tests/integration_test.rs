//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, en un thread
//! de fondo, y le habla con bytes crudos por TCP.

use simple_http::config::Config;
use simple_http::handlers::FileHandler;
use simple_http::http::{Request, Response};
use simple_http::router::Router;
use simple_http::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Sitio de prueba con un index, un archivo de dígitos y uno binario
fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), b"YAY!!!").unwrap();
    fs::write(dir.path().join("digits.txt"), b"0123456789").unwrap();
    fs::write(dir.path().join("blob.bin"), [0u8, 13, 10, 13, 10, 255, 0]).unwrap();
    dir
}

/// Levanta un servidor con el router indicado y retorna su dirección
fn start_server(router: Router) -> SocketAddr {
    let config = Config {
        port: 0,
        server_name: "integration/1.0".to_string(),
        ..Config::default()
    };

    let mut server = Server::new(config, router);
    let addr = server.bind().expect("bind");

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Router que sirve el sitio solo para paths con extensión
fn file_router(dir: &TempDir) -> Router {
    let mut router = Router::new();
    router
        .register(r"^((/|[a-zA-Z0-9]+))+\.[a-zA-Z0-9]+$", FileHandler::new(dir.path()))
        .unwrap();
    router
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

fn send_request(addr: SocketAddr, raw: &str) -> String {
    String::from_utf8_lossy(&send_raw(addr, raw.as_bytes())).into_owned()
}

/// Separa status line + headers del body
fn split_response(response: &[u8]) -> (String, Vec<u8>) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    (
        String::from_utf8_lossy(&response[..pos]).into_owned(),
        response[pos + 4..].to_vec(),
    )
}

// ==================== Archivos ====================

#[test]
fn test_serves_default_document() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert!(response.contains("Content-Length: 6\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.ends_with("\r\n\r\nYAY!!!"));
}

#[test]
fn test_serves_named_file() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET /digits.txt HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Accept-Ranges: bytes\r\n"));
    assert!(response.ends_with("0123456789"));
}

#[test]
fn test_range_request() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET /digits.txt HTTP/1.1\r\nRange: bytes=2-4\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 206 Partial Content\r\n"));
    assert!(response.contains("Content-Range: bytes 2-4/10\r\n"));
    assert!(response.contains("Content-Length: 3\r\n"));
    assert!(response.ends_with("\r\n\r\n234"));
}

#[test]
fn test_invalid_range_is_400() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET /digits.txt HTTP/1.1\r\nRange: bytes=7-3\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_binary_body_is_intact() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_raw(addr, b"GET /blob.bin HTTP/1.1\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("Content-Length: 7"));
    assert_eq!(body, vec![0u8, 13, 10, 13, 10, 255, 0]);
}

#[test]
fn test_missing_file_is_404() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET /nothing.txt HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

// ==================== Routing ====================

#[test]
fn test_no_matching_route_is_501() {
    let mut router = Router::new();
    router
        .register("^/api", |_req: &Request| -> simple_http::Result<Response> {
            Ok(Response::ok("api"))
        })
        .unwrap();
    let addr = start_server(router);

    let response = send_request(addr, "GET /missing.txt HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 501 Not Implemented\r\n"));
    assert!(response.contains("/missing.txt"));
}

#[test]
fn test_longest_match_over_tcp() {
    let mut router = Router::new();
    router
        .register("^/", |_req: &Request| -> simple_http::Result<Response> {
            Ok(Response::ok("root"))
        })
        .unwrap();
    router
        .register("^/docs/.*", |_req: &Request| -> simple_http::Result<Response> {
            Ok(Response::ok("docs"))
        })
        .unwrap();
    let addr = start_server(router);

    assert!(send_request(addr, "GET /docs/a.html HTTP/1.1\r\n\r\n").ends_with("docs"));
    assert!(send_request(addr, "GET /other HTTP/1.1\r\n\r\n").ends_with("root"));
}

#[test]
fn test_handler_sees_body_and_query() {
    let mut router = Router::new();
    router
        .register("^/echo$", |req: &Request| -> simple_http::Result<Response> {
            let body = String::from_utf8_lossy(req.body().unwrap_or_default()).into_owned();
            Ok(Response::ok(format!("{}|{}", req.query_string(), body)))
        })
        .unwrap();
    let addr = start_server(router);

    let response = send_request(
        addr,
        "POST /echo?x=1 HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    );

    assert!(response.ends_with("x=1|hello"), "got: {}", response);
}

#[test]
fn test_caller_content_length_is_kept() {
    let mut router = Router::new();
    router
        .register(".*", |_req: &Request| -> simple_http::Result<Response> {
            Ok(Response::ok("abc").with_header("Content-Length", "3"))
        })
        .unwrap();
    let addr = start_server(router);

    let response = send_request(addr, "GET /x HTTP/1.1\r\n\r\n");

    assert_eq!(response.matches("Content-Length").count(), 1);
}

// ==================== Errores y headers ====================

#[test]
fn test_unsupported_method_is_400() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "BREW /pot HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_common_headers() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let response = send_request(addr, "GET /digits.txt HTTP/1.1\r\n\r\n");

    assert!(response.contains("Server: integration/1.0\r\n"));
    assert!(response.contains("Connection: close\r\n"));
    assert!(response.contains("Date: "));
}

#[test]
fn test_concurrent_connections() {
    let dir = site();
    let addr = start_server(file_router(&dir));

    let clients: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || send_request(addr, "GET /digits.txt HTTP/1.1\r\n\r\n")))
        .collect();

    for client in clients {
        let response = client.join().unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}
