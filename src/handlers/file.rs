//! # Handler de archivos
//! src/handlers/file.rs
//!
//! Busca el path del request dentro de un directorio base y lo sirve
//! completo o por rangos. Solo acepta GET y POST (el body de POST se ignora).
//!
//! Patrón sugerido para registrarlo: `^((/|[a-zA-Z0-9]+))+\.[a-zA-Z0-9]+$`,
//! o `.*` para servir todo el directorio.

use crate::content::{self, FileSource};
use crate::error::Result;
use crate::http::{pages, Method, Request, Response};
use crate::router::Handler;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Sirve archivos desde `base_dir`
#[derive(Debug, Clone)]
pub struct FileHandler {
    base_dir: PathBuf,
}

impl FileHandler {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directorio desde el que se sirven los archivos
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resuelve el path del request dentro de `base_dir`
    ///
    /// Retorna `None` si el path intenta salir del directorio base.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            None
        } else {
            Some(self.base_dir.join(relative))
        }
    }
}

impl Handler for FileHandler {
    fn handle(&self, request: &Request) -> Result<Response> {
        if !matches!(request.method(), Method::GET | Method::POST) {
            info!(method = %request.method(), "method not allowed for file requests");
            return Ok(pages::method_not_allowed());
        }

        let Some(file) = self.resolve(request.path()) else {
            info!(path = request.path(), "refusing path outside the document root");
            return Ok(pages::forbidden("the path leaves the document root"));
        };

        if !file.is_file() {
            info!(path = %file.display(), "file not found");
            return Ok(pages::not_found());
        }

        let source = match FileSource::open(&file) {
            Ok(source) => source,
            Err(err) => return Ok(content::failure_response(&err)),
        };

        Ok(content::respond(&source, request.header("Range")))
    }
}
