//! # Simple HTTP - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: sirve el directorio configurado con un
//! único `FileHandler` registrado como `.*`.

use simple_http::config::Config;
use simple_http::handlers::FileHandler;
use simple_http::logging;
use simple_http::router::Router;
use simple_http::server::Server;
use tracing::error;

fn main() {
    // Crear configuración desde CLI y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        std::process::exit(1);
    }

    logging::init(&config.log_level);
    config.log_summary();

    let mut router = Router::with_server_name(config.server_name.clone());
    if let Err(e) = router.register(".*", FileHandler::new(&config.root_dir)) {
        error!("could not register file handler: {}", e);
        std::process::exit(1);
    }

    let mut server = Server::new(config, router);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!("fatal error: {}", e);
        std::process::exit(1);
    }
}
