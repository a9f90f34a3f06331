//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP de forma
//! programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: Sun, 18 Oct 2026 10:00:00 GMT\r\n
//! Connection: close\r\n
//! Server: simple_http\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use simple_http::http::{Response, StatusCode};
//!
//! let mut response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::StatusCode;
use std::time::SystemTime;

/// Valor por defecto del header `Server`
pub const DEFAULT_SERVER_NAME: &str = "simple_http";

/// Versión usada en la status line si nadie la cambia
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa
///
/// Toda respuesta nace con `Date`, `Connection: close` y `Server`.
/// `Content-Length` se agrega al serializar si el llamador no lo fijó.
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Versión de la status line (ej: "HTTP/1.1")
    version: String,

    /// Headers en el orden en que se fijaron; un nombre aparece una sola vez
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta, binario
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta vacía con los headers por defecto
    ///
    /// # Ejemplo
    /// ```
    /// use simple_http::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.header("Connection"), Some("close"));
    /// assert!(response.header("Date").is_some());
    /// ```
    pub fn new(status: StatusCode) -> Self {
        let mut response = Self {
            status,
            version: DEFAULT_VERSION.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        };

        response.add_header("Date", &httpdate::fmt_http_date(SystemTime::now()));
        response.add_header("Connection", "close");
        response.add_header("Server", DEFAULT_SERVER_NAME);
        response
    }

    /// Crea una respuesta 200 OK con el body indicado
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok).with_body_bytes(body.into())
    }

    /// Crea una respuesta con body HTML
    pub fn html(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(body)
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin distinguir mayúsculas), se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Elimina un header si existe
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (imágenes, archivos, rangos).
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Reemplaza el body
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    /// Cambia el código de estado
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Cambia la versión de la status line (ej: "HTTP/1.0")
    pub fn set_version(&mut self, version: &str) {
        self.version = version.to_string();
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`, en el orden en que se fijaron
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario, sin recodificar
    ///
    /// Si no hay `Content-Length`, se calcula aquí una sola vez y queda fijo:
    /// cambiar el body después no lo actualiza.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        if self.header("Content-Length").is_none() {
            let length = self.body.len().to_string();
            self.headers.push(("Content-Length".to_string(), length));
        }

        let mut head = format!("{} {}\r\n", self.version, self.status);
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Versión de la status line
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene un header por nombre, sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Representación textual para depuración
///
/// **No usar para enviar datos**: el body se convierte con pérdida a UTF-8 y
/// los contenidos binarios quedan corruptos. Para el socket usar
/// [`Response::to_bytes`].
impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}\r\n", self.version, self.status)?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        if self.header("Content-Length").is_none() {
            write!(f, "Content-Length: {}\r\n", self.body.len())?;
        }
        write!(f, "\r\n{}", String::from_utf8_lossy(&self.body))
    }
}
