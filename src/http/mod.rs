//! # Módulo HTTP
//!
//! Este módulo implementa la capa de protocolo desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line, headers, body de longitud fija)
//! - Construcción y serialización de responses
//! - Códigos de estado
//! - Páginas HTML estándar para errores y redirecciones
//!
//! ## Alcance del protocolo
//!
//! - Un request por conexión, siempre `Connection: close`
//! - Sin chunked transfer encoding ni keep-alive
//! - El body solo se lee si viene `Content-Length`
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 206 Partial Content\r\n
//! Content-Range: bytes 0-4/10\r\n
//! Content-Length: 5\r\n
//! \r\n
//! 01234
//! ```

pub mod pages;     // Respuestas HTML estándar
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, Request, RequestParser, DEFAULT_DOCUMENT};
pub use response::{Response, DEFAULT_SERVER_NAME};
pub use status::StatusCode;
