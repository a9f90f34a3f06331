//! # Logging
//! src/logging.rs
//!
//! Inicializa el subscriber de `tracing`. `RUST_LOG` tiene prioridad sobre el
//! nivel configurado.

use tracing_subscriber::EnvFilter;

/// Instala el subscriber global con el nivel indicado
///
/// Llamarla más de una vez no tiene efecto: el primer subscriber se queda.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .with_target(false)
        .try_init();
}
