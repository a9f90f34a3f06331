//! # Handlers incluidos
//! src/handlers/mod.rs
//!
//! Implementaciones de [`Handler`](crate::router::Handler) listas para
//! registrar en el router:
//!
//! - [`FileHandler`]: sirve archivos de un directorio, con soporte de rangos
//! - [`CatchAllHandler`]: responde 404 a todo; se registra con `.*` para
//!   ocultar los 501 de rutas sin handler
//! - [`HandlerMissingHandler`]: el 501 que usa el router cuando nada coincide

pub mod file;

pub use file::FileHandler;

use crate::error::Result;
use crate::http::{pages, Request, Response};
use crate::router::Handler;

/// Responde 404 Not Found a cualquier request
#[derive(Debug, Clone, Copy, Default)]
pub struct CatchAllHandler;

impl Handler for CatchAllHandler {
    fn handle(&self, _request: &Request) -> Result<Response> {
        Ok(pages::not_found())
    }
}

/// Responde 501 Not Implemented nombrando el path sin handler
#[derive(Debug, Clone)]
pub struct HandlerMissingHandler {
    path: String,
}

impl HandlerMissingHandler {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Handler for HandlerMissingHandler {
    fn handle(&self, _request: &Request) -> Result<Response> {
        Ok(pages::handler_missing(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use crate::router::Router;

    #[test]
    fn test_catch_all_is_404() {
        let request = Request::parse(b"GET /whatever HTTP/1.1\r\n\r\n").unwrap();
        let response = CatchAllHandler.handle(&request).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_catch_all_hides_missing_handler() {
        let mut router = Router::new();
        router.register(".*", CatchAllHandler).unwrap();

        let request = Request::parse(b"GET /nothing/here HTTP/1.1\r\n\r\n").unwrap();
        let response = router.route(&request).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_handler_missing_names_path() {
        let request = Request::parse(b"GET /missing.txt HTTP/1.1\r\n\r\n").unwrap();
        let response = HandlerMissingHandler::new(request.path())
            .handle(&request)
            .unwrap();
        let body = String::from_utf8(response.body().to_vec()).unwrap();

        assert_eq!(response.status(), StatusCode::NotImplemented);
        assert!(body.contains("/missing.txt"));
    }
}
