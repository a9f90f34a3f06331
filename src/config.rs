//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./simple_http --port 9999 --root-dir ./www --server-name "acme/1.0"
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9999 HTTP_ROOT=/srv/www LOG_LEVEL=debug ./simple_http
//! ```

use clap::Parser;
use tracing::info;

/// Niveles aceptados por `--log-level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "simple_http")]
#[command(about = "Servidor HTTP mínimo con enrutamiento por expresiones regulares")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven archivos
    #[arg(long = "root-dir", default_value = "./www", env = "HTTP_ROOT")]
    pub root_dir: String,

    /// Documento al que se reescribe el path `/`
    #[arg(long = "default-document", default_value = "index.html", env = "HTTP_DEFAULT_DOCUMENT")]
    pub default_document: String,

    /// Valor del header `Server` en todas las respuestas
    #[arg(long = "server-name", default_value = "simple_http", env = "HTTP_SERVER_NAME")]
    pub server_name: String,

    /// Nivel de log cuando `RUST_LOG` no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use simple_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.default_document.is_empty() {
            return Err("Default document must not be empty".to_string());
        }
        if self.default_document.starts_with('/') {
            return Err("Default document must be relative (no leading '/')".to_string());
        }

        // El nombre termina en un header: CR/LF partirían la respuesta
        if self.server_name.trim().is_empty() {
            return Err("Server name must not be empty".to_string());
        }
        if self.server_name.contains(|c: char| c == '\r' || c == '\n') {
            return Err("Server name must not contain CR or LF".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            root_dir = %self.root_dir,
            default_document = %self.default_document,
            server_name = %self.server_name,
            "server configuration"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            root_dir: "./www".to_string(),
            default_document: "index.html".to_string(),
            server_name: "simple_http".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.root_dir, "./www");
        assert_eq!(config.default_document, "index.html");
        assert_eq!(config.server_name, "simple_http");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    // ==================== Default Document ====================

    #[test]
    fn test_validate_empty_default_document() {
        let mut config = Config::default();
        config.default_document = String::new();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Default document"));
    }

    #[test]
    fn test_validate_absolute_default_document() {
        let mut config = Config::default();
        config.default_document = "/index.html".to_string();
        assert!(config.validate().is_err());
    }

    // ==================== Server Name ====================

    #[test]
    fn test_validate_server_name_with_newline() {
        let mut config = Config::default();
        config.server_name = "evil\r\nSet-Cookie: x".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("CR or LF"));
    }

    #[test]
    fn test_validate_blank_server_name() {
        let mut config = Config::default();
        config.server_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // ==================== Log Level ====================

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        config.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("Log level"));
    }

    // ==================== CLI ====================

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "simple_http",
            "--port",
            "9999",
            "--root-dir",
            "/srv/www",
            "--server-name",
            "acme",
        ])
        .unwrap();

        assert_eq!(config.port, 9999);
        assert_eq!(config.root_dir, "/srv/www");
        assert_eq!(config.server_name, "acme");
    }

    #[test]
    fn test_log_summary() {
        // Should not panic
        Config::default().log_summary();
    }
}
