//! # Errores del servidor
//! src/error.rs
//!
//! Taxonomía única de errores. Los errores de parsing y de transporte
//! abortan solo la conexión actual; los de rango y de lectura de contenido
//! se convierten en respuestas HTTP dentro del responder.

use thiserror::Error;

/// Errores que pueden ocurrir al procesar una conexión
#[derive(Debug, Error)]
pub enum HttpError {
    /// La request line no tiene método, target y versión
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Método fuera del conjunto soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Línea de header sin `:`
    #[error("Malformed header line: {0:?}")]
    MalformedHeader(String),

    /// `Content-Length` que no es un entero decimal no negativo
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// Header `Range` imposible de interpretar o de satisfacer
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Patrón de ruta que no compila como expresión regular
    #[error("Invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Fallo de transporte o de disco
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error lanzado por un handler mientras procesaba el request
    #[error("Request processing failed: {0}")]
    RequestProcessing(String),
}

impl HttpError {
    /// Indica si el error es culpa del cliente y merece un 400
    ///
    /// Los errores de I/O nunca generan respuesta: la conexión se descarta.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HttpError::MalformedRequestLine(_)
                | HttpError::UnsupportedMethod(_)
                | HttpError::MalformedHeader(_)
                | HttpError::InvalidContentLength(_)
                | HttpError::InvalidRange(_)
        )
    }
}

/// Resultado con el error del crate
pub type Result<T> = std::result::Result<T, HttpError>;
