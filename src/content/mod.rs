//! # Respuestas con soporte de rangos
//! src/content/mod.rs
//!
//! Construye la respuesta para un recurso de tamaño conocido según el header
//! `Range` del request:
//!
//! - Sin `Range` o con `bytes=0-`: 200 con el recurso completo
//! - `bytes=start-end`: 206 con `end` recortado a `size - 1`
//! - `bytes=start-`: 206 desde `start` hasta el final
//!
//! El responder nunca falla: un rango inválido produce 400, un recurso que
//! desapareció produce 404 y cualquier otro error de lectura produce 500.

pub mod mime;
pub mod source;

pub use source::{ContentSource, FileSource, MemorySource};

use crate::error::{HttpError, Result};
use crate::http::{pages, Response, StatusCode};
use std::io;
use tracing::{debug, error, info, warn};

/// Rango de bytes inclusivo ya validado contra el tamaño del recurso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Interpreta el valor de un header `Range` para un recurso de `size` bytes
    ///
    /// El prefijo `bytes=` se compara sin distinguir mayúsculas. Solo se
    /// admite un rango; no hay rangos por sufijo (`-500`).
    ///
    /// # Errores
    ///
    /// `InvalidRange` si algún número no se puede parsear, si el recurso está
    /// vacío o si el inicio queda después del final.
    ///
    /// # Ejemplo
    /// ```
    /// use simple_http::content::ByteRange;
    ///
    /// let range = ByteRange::parse("bytes=8-100", 10).unwrap();
    /// assert_eq!((range.start, range.end), (8, 9));
    /// ```
    pub fn parse(header: &str, size: u64) -> Result<Self> {
        let spec = match header.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bytes=") => &header[6..],
            _ => header,
        };
        let spec = spec.trim();

        let parse_number = |text: &str| -> Result<u64> {
            text.trim().parse::<u64>().map_err(|e| {
                HttpError::InvalidRange(format!("{:?} in {:?}: {}", text, header, e))
            })
        };

        if size == 0 {
            return Err(HttpError::InvalidRange(format!(
                "{:?} requested on an empty resource",
                header
            )));
        }
        let last = size - 1;

        let (start, end) = match spec.split_once('-') {
            Some((start, end)) if !end.is_empty() => {
                (parse_number(start)?, parse_number(end)?.min(last))
            }
            Some((start, _)) => (parse_number(start)?, last),
            None => (parse_number(spec)?, last),
        };

        if start > end {
            return Err(HttpError::InvalidRange(format!(
                "{:?} starts after byte {} of a {} byte resource",
                header, end, size
            )));
        }

        Ok(Self { start, end })
    }

    /// Cantidad de bytes del rango (`end - start + 1`), nunca cero
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Valor del header `Content-Range` (ej: "bytes 0-4/10")
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

/// Indica si el header pide el recurso completo
pub fn wants_full_content(range: Option<&str>) -> bool {
    match range {
        None => true,
        Some(value) => value.eq_ignore_ascii_case("bytes=0-"),
    }
}

/// Construye la respuesta completa o parcial para `source`
///
/// # Ejemplo
/// ```
/// use simple_http::content::{self, MemorySource};
/// use simple_http::http::StatusCode;
///
/// let source = MemorySource::new("0123456789");
/// let response = content::respond(&source, Some("bytes=0-4"));
///
/// assert_eq!(response.status(), StatusCode::PartialContent);
/// assert_eq!(response.header("Content-Range"), Some("bytes 0-4/10"));
/// assert_eq!(response.body(), b"01234");
/// ```
pub fn respond<S: ContentSource + ?Sized>(source: &S, range: Option<&str>) -> Response {
    match range {
        Some(header) if !wants_full_content(range) => respond_partial(source, header),
        _ => respond_full(source),
    }
}

fn respond_full<S: ContentSource + ?Sized>(source: &S) -> Response {
    let size = source.size();

    match source.read_range(0, size) {
        Ok(bytes) => {
            let mut response = Response::new(StatusCode::Ok)
                .with_header("Content-Length", &bytes.len().to_string())
                .with_header("Accept-Ranges", "bytes")
                .with_body_bytes(bytes);
            add_content_type(&mut response, source);
            response
        }
        Err(err) => failure_response(&err),
    }
}

fn respond_partial<S: ContentSource + ?Sized>(source: &S, header: &str) -> Response {
    let size = source.size();

    let range = match ByteRange::parse(header, size) {
        Ok(range) => range,
        Err(err) => {
            warn!(range = header, size, "rejecting range request: {}", err);
            return pages::bad_request(&err.to_string());
        }
    };

    debug!(start = range.start, end = range.end, size, "range request");

    match source.read_range(range.start, range.len()) {
        Ok(bytes) => {
            let mut response = Response::new(StatusCode::PartialContent)
                .with_header("Content-Length", &range.len().to_string())
                .with_header("Content-Range", &range.content_range(size))
                .with_header("Accept-Ranges", "bytes")
                .with_body_bytes(bytes);
            add_content_type(&mut response, source);
            response
        }
        Err(err) => failure_response(&err),
    }
}

fn add_content_type<S: ContentSource + ?Sized>(response: &mut Response, source: &S) {
    if let Some(mime_type) = source.mime_type() {
        response.add_header("Content-Type", &mime_type);
    }
}

/// Convierte un error de lectura en 404 (recurso ausente) o 500
pub fn failure_response(err: &io::Error) -> Response {
    if err.kind() == io::ErrorKind::NotFound {
        info!("content vanished before it could be read: {}", err);
        pages::not_found()
    } else {
        error!("error reading content: {}", err);
        pages::internal_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fuente cuyo contenido falla siempre con el tipo de error indicado
    struct BrokenSource(io::ErrorKind);

    impl ContentSource for BrokenSource {
        fn size(&self) -> u64 {
            10
        }

        fn read_range(&self, _offset: u64, _length: u64) -> io::Result<Vec<u8>> {
            Err(io::Error::new(self.0, "broken"))
        }

        fn mime_type(&self) -> Option<String> {
            None
        }
    }

    fn ten_bytes() -> MemorySource {
        MemorySource::new("0123456789").with_mime_type("text/plain")
    }

    #[test]
    fn test_parse_two_components() {
        let range = ByteRange::parse("bytes=2-5", 10).unwrap();
        assert_eq!(range, ByteRange { start: 2, end: 5 });
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_parse_clamps_end() {
        let range = ByteRange::parse("bytes=8-100", 10).unwrap();
        assert_eq!(range, ByteRange { start: 8, end: 9 });
        assert_eq!(range.content_range(10), "bytes 8-9/10");
    }

    #[test]
    fn test_parse_open_end() {
        assert_eq!(
            ByteRange::parse("bytes=3-", 10).unwrap(),
            ByteRange { start: 3, end: 9 }
        );
        assert_eq!(
            ByteRange::parse("BYTES=7", 10).unwrap(),
            ByteRange { start: 7, end: 9 }
        );
    }

    #[test]
    fn test_parse_invalid() {
        for header in ["bytes=a-4", "bytes=0-x", "bytes=-5", "bytes=0-1,3-4", "bytes="] {
            assert!(
                matches!(ByteRange::parse(header, 10), Err(HttpError::InvalidRange(_))),
                "{:?} should be rejected",
                header
            );
        }
    }

    #[test]
    fn test_parse_unsatisfiable() {
        assert!(ByteRange::parse("bytes=10-", 10).is_err());
        assert!(ByteRange::parse("bytes=5-2", 10).is_err());
        assert!(ByteRange::parse("bytes=0-0", 0).is_err());
    }

    #[test]
    fn test_wants_full_content() {
        assert!(wants_full_content(None));
        assert!(wants_full_content(Some("bytes=0-")));
        assert!(wants_full_content(Some("Bytes=0-")));
        assert!(!wants_full_content(Some("bytes=0-4")));
    }

    #[test]
    fn test_full_response_without_range() {
        let response = respond(&ten_bytes(), None);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"0123456789");
        assert_eq!(response.header("Content-Length"), Some("10"));
        assert_eq!(response.header("Accept-Ranges"), Some("bytes"));
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert!(response.header("Content-Range").is_none());
    }

    #[test]
    fn test_full_response_for_bytes_zero_open() {
        let response = respond(&ten_bytes(), Some("bytes=0-"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body().len(), 10);
    }

    #[test]
    fn test_partial_response() {
        let response = respond(&ten_bytes(), Some("bytes=0-4"));

        assert_eq!(response.status(), StatusCode::PartialContent);
        assert_eq!(response.header("Content-Range"), Some("bytes 0-4/10"));
        assert_eq!(response.header("Content-Length"), Some("5"));
        assert_eq!(response.header("Accept-Ranges"), Some("bytes"));
        assert_eq!(response.body(), b"01234");
    }

    #[test]
    fn test_partial_response_clamped() {
        let response = respond(&ten_bytes(), Some("bytes=8-100"));

        assert_eq!(response.status(), StatusCode::PartialContent);
        assert_eq!(response.header("Content-Range"), Some("bytes 8-9/10"));
        assert_eq!(response.body(), b"89");
    }

    #[test]
    fn test_unknown_mime_has_no_content_type() {
        let response = respond(&MemorySource::new("abc"), Some("bytes=1-"));

        assert_eq!(response.body(), b"bc");
        assert!(response.header("Content-Type").is_none());
    }

    #[test]
    fn test_invalid_range_is_400() {
        let response = respond(&ten_bytes(), Some("bytes=x-"));
        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_missing_content_is_404() {
        let response = respond(&BrokenSource(io::ErrorKind::NotFound), None);
        assert_eq!(response.status(), StatusCode::NotFound);

        let response = respond(&BrokenSource(io::ErrorKind::NotFound), Some("bytes=1-2"));
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_read_failure_is_500() {
        let response = respond(&BrokenSource(io::ErrorKind::PermissionDenied), Some("bytes=1-2"));
        assert_eq!(response.status(), StatusCode::InternalServerError);
    }

    #[test]
    fn test_dyn_source() {
        let source: Box<dyn ContentSource> = Box::new(ten_bytes());
        let response = respond(source.as_ref(), Some("bytes=9-"));
        assert_eq!(response.body(), b"9");
    }
}
