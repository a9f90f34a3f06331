//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests desde cero, leyendo
//! directamente del stream de la conexión.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD TARGET HTTP/VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Exactamente `Content-Length` bytes, si el header existe

use crate::error::{HttpError, Result};
use std::collections::HashMap;
use std::io::{self, BufRead, Read};

/// Documento servido cuando el path es exactamente `/`
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    HEAD,
    PUT,
    DELETE,
    TRACE,
    OPTIONS,
    CONNECT,
}

impl Method {
    /// Parsea un método HTTP desde el token de la request line
    ///
    /// El token se compara en mayúsculas, así que `get` también es válido.
    ///
    /// # Errores
    ///
    /// Retorna `UnsupportedMethod` si el método no está en el conjunto soportado
    pub fn from_token(token: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "HEAD" => Ok(Method::HEAD),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "TRACE" => Ok(Method::TRACE),
            "OPTIONS" => Ok(Method::OPTIONS),
            "CONNECT" => Ok(Method::CONNECT),
            _ => Err(HttpError::UnsupportedMethod(token.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::HEAD => "HEAD",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::TRACE => "TRACE",
            Method::OPTIONS => "OPTIONS",
            Method::CONNECT => "CONNECT",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP parseado
///
/// Es inmutable una vez construido por el [`RequestParser`].
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Target tal como vino en la request line (ej: "/a%20b?x=1")
    raw_target: String,

    /// Path sin query string, con `%20` decodificado (ej: "/a b")
    path: String,

    /// Todo lo que sigue al primer `?` (vacío si no hay)
    query_string: String,

    /// Versión HTTP sin el prefijo `HTTP/` (ej: "1.1")
    version: String,

    /// Headers HTTP; ante nombres repetidos gana la última aparición
    headers: HashMap<String, String>,

    /// Body, presente solo si el request declaró `Content-Length`
    body: Option<Vec<u8>>,
}

/// Parser de requests configurado con el documento por defecto
#[derive(Debug, Clone)]
pub struct RequestParser {
    default_document: String,
}

impl RequestParser {
    /// Crea un parser que reescribe `/` al documento indicado
    pub fn new(default_document: impl Into<String>) -> Self {
        Self {
            default_document: default_document.into(),
        }
    }

    /// Documento al que se reescribe el path `/`
    pub fn default_document(&self) -> &str {
        &self.default_document
    }

    /// Lee un request completo desde el stream
    ///
    /// # Errores
    ///
    /// * `MalformedRequestLine` - menos de tres tokens en la primera línea
    /// * `UnsupportedMethod` - método desconocido
    /// * `MalformedHeader` - línea de header sin `:`
    /// * `InvalidContentLength` - `Content-Length` no numérico
    /// * `Io` - el stream terminó antes de tiempo o falló la lectura
    pub fn parse<R: BufRead>(&self, reader: &mut R) -> Result<Request> {
        // 1. Request line
        let line = read_line(reader)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "No data received")
        })?;
        let line = String::from_utf8(line).map_err(|e| {
            HttpError::MalformedRequestLine(String::from_utf8_lossy(e.as_bytes()).into_owned())
        })?;
        let (method, raw_target, version) = Self::parse_request_line(&line)?;

        // 2. Path y query string
        let (path, query_string) = self.decode_target(&raw_target);

        // 3. Headers hasta la línea vacía
        let headers = Self::parse_headers(reader)?;

        // 4. Body de longitud fija
        let body = Self::read_body(reader, &headers)?;

        Ok(Request {
            method,
            raw_target,
            path,
            query_string,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path?query HTTP/1.1`. Se separa por espacios simples y
    /// los tokens sobrantes se ignoran.
    fn parse_request_line(line: &str) -> Result<(Method, String, String)> {
        let parts: Vec<&str> = line.split(' ').take(3).collect();

        if parts.len() < 3 {
            return Err(HttpError::MalformedRequestLine(line.to_string()));
        }

        let method = Method::from_token(parts[0])?;

        // Sin validar la versión: solo se extrae lo que sigue a la `/`
        let version = match parts[2].split_once('/') {
            Some((_, version)) => version,
            None => parts[2],
        };

        Ok((method, parts[1].to_string(), version.to_string()))
    }

    /// Separa path y query string del target
    ///
    /// Solo `%20` se decodifica; el resto de secuencias `%XX` se conservan.
    fn decode_target(&self, raw_target: &str) -> (String, String) {
        let decoded = raw_target.replace("%20", " ");

        let (path, query) = match decoded.find('?') {
            Some(pos) => (decoded[..pos].to_string(), decoded[pos + 1..].to_string()),
            None => (decoded, String::new()),
        };

        if path == "/" || path.is_empty() {
            (self.default_document.clone(), query)
        } else {
            (path, query)
        }
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". Se parte en el primer `:`.
    fn parse_headers<R: BufRead>(reader: &mut R) -> Result<HashMap<String, String>> {
        let mut headers = HashMap::new();

        loop {
            // Un EOF antes de la línea vacía es un fallo de transporte
            let line = read_line(reader)?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "Stream ended inside headers")
            })?;

            if line.is_empty() {
                break;
            }

            let line = String::from_utf8(line).map_err(|e| {
                HttpError::MalformedHeader(String::from_utf8_lossy(e.as_bytes()).into_owned())
            })?;

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_string(), value.trim().to_string());
                }
                None => return Err(HttpError::MalformedHeader(line.clone())),
            }
        }

        Ok(headers)
    }

    /// Lee exactamente `Content-Length` bytes si el header existe
    fn read_body<R: BufRead>(
        reader: &mut R,
        headers: &HashMap<String, String>,
    ) -> Result<Option<Vec<u8>>> {
        let Some(raw_length) = find_header(headers, "Content-Length") else {
            return Ok(None);
        };

        let length: u64 = raw_length
            .parse()
            .map_err(|_| HttpError::InvalidContentLength(raw_length.to_string()))?;

        let mut body = Vec::new();
        reader.take(length).read_to_end(&mut body)?;

        if (body.len() as u64) < length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Body truncated: expected {} bytes, got {}", length, body.len()),
            )
            .into());
        }

        Ok(Some(body))
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT)
    }
}

/// Lee una línea terminada en `\n` y quita el `\r\n` final
///
/// Retorna `None` si el stream ya estaba en EOF.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let read = reader.read_until(b'\n', &mut line)?;

    if read == 0 {
        return Ok(None);
    }

    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

/// Busca un header por nombre exacto y, si no está, sin distinguir mayúsculas
fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(|s| s.as_str())
}

impl Request {
    /// Parsea un request desde bytes con el documento por defecto
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use simple_http::http::Request;
    ///
    /// let raw = b"GET /a?b=c HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/a");
    /// assert_eq!(request.query_string(), "b=c");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let mut reader = buffer;
        RequestParser::default().parse(&mut reader)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Target tal como lo envió el cliente
    pub fn raw_target(&self) -> &str {
        &self.raw_target
    }

    /// Obtiene el path del request (nunca vacío)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string sin decodificar (vacía si no hay `?`)
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Obtiene un query parameter específico
    ///
    /// Un parámetro sin `=` (ej: `?debug`) retorna `Some("")`.
    ///
    /// # Ejemplo
    /// ```
    /// use simple_http::http::Request;
    ///
    /// let request = Request::parse(b"GET /test?num=42&debug HTTP/1.0\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.query_param("num"), Some("42"));
    /// assert_eq!(request.query_param("debug"), Some(""));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string
            .split('&')
            .filter(|param| !param.is_empty())
            .map(|param| param.split_once('=').unwrap_or((param, "")))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Obtiene la versión HTTP (ej: "1.1")
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    ///
    /// Busca primero el nombre exacto y luego sin distinguir mayúsculas.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Longitud declarada del body, si la hay
    pub fn content_length(&self) -> Option<usize> {
        self.body.as_ref().map(Vec::len)
    }

    /// Obtiene el body del request, si se declaró `Content-Length`
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
