//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Lee y parsea un request HTTP
//! 4. Genera y envía la response y cierra la conexión
//!
//! TLS queda fuera del crate: [`Server::run_with`] recibe una función que
//! envuelve cada `TcpStream` en el stream cifrado que se quiera usar.

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{handle_connection, Server};
