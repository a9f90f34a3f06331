//! # Simple HTTP
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo y embebible: parsea un request por conexión, lo
//! enruta por expresiones regulares con la regla de coincidencia más larga y
//! sirve contenido completo o por rangos de bytes.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: request, response, códigos de estado y páginas estándar
//! - `router`: selección de handler por coincidencia más larga
//! - `content`: respuestas 200/206 sobre archivos o memoria
//! - `handlers`: handlers listos para registrar (archivos, 404, 501)
//! - `server`: accept loop y manejo de conexiones
//! - `config` y `logging`: CLI/variables de entorno y `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use simple_http::config::Config;
//! use simple_http::handlers::FileHandler;
//! use simple_http::router::Router;
//! use simple_http::server::Server;
//!
//! let config = Config::default();
//! let mut router = Router::new();
//! router.register(".*", FileHandler::new(&config.root_dir)).unwrap();
//!
//! let mut server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;

pub use error::{HttpError, Result};
