//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que elige, para cada request, el handler
//! cuyo patrón reconoce la porción más larga del path.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Cada patrón es una expresión regular que se *busca* (no se ancla) dentro
//! del path. Reglas de selección:
//!
//! 1. Gana el patrón cuya primera coincidencia es más larga.
//! 2. Ante empate, gana el patrón con el texto más largo.
//!
//! Ambas longitudes se miden en caracteres, no en bytes.
//! 3. Si también empatan, gana el registrado después.
//!
//! Si ningún patrón coincide, se responde 501 nombrando el path.

use crate::error::{HttpError, Result};
use crate::handlers::HandlerMissingHandler;
use crate::http::{Request, Response, DEFAULT_SERVER_NAME};
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Capacidad de convertir un request en una response
///
/// Un handler puede fallar con `RequestProcessing`; el router no convierte
/// ese error en respuesta, lo propaga a la capa de conexión.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Result<Response>;
}

/// Cualquier closure o función con la firma correcta es un handler
impl<F> Handler for F
where
    F: Fn(&Request) -> Result<Response> + Send + Sync,
{
    fn handle(&self, request: &Request) -> Result<Response> {
        self(request)
    }
}

/// Una ruta registrada: patrón original, regex compilada y handler
#[derive(Clone)]
pub struct Route {
    pattern: String,
    regex: Regex,
    handler: Arc<dyn Handler>,
}

impl Route {
    /// Texto del patrón tal como se registró
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Longitud en caracteres de la primera coincidencia dentro del path
    fn match_len(&self, path: &str) -> Option<usize> {
        self.regex.find(path).map(|m| m.as_str().chars().count())
    }

    /// Longitud en caracteres del texto del patrón
    fn pattern_len(&self) -> usize {
        self.pattern.chars().count()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("pattern", &self.pattern).finish()
    }
}

/// Router que mapea patrones a handlers
///
/// Se configura antes de arrancar el servidor y luego se comparte en un
/// `Arc` de solo lectura entre todos los threads de conexión.
#[derive(Debug, Clone)]
pub struct Router {
    /// Rutas en orden de registro
    routes: Vec<Route>,

    /// Valor del header `Server` de todas las respuestas
    server_name: String,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self::with_server_name(DEFAULT_SERVER_NAME)
    }

    /// Crea un router vacío que firma las respuestas con `server_name`
    pub fn with_server_name(server_name: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            server_name: server_name.into(),
        }
    }

    /// Registra un patrón con su handler
    ///
    /// Registrar otra vez el mismo texto de patrón reemplaza su handler y
    /// conserva la posición original.
    ///
    /// # Errores
    ///
    /// `InvalidPattern` si el patrón no es una expresión regular válida.
    ///
    /// # Ejemplo
    /// ```
    /// use simple_http::router::Router;
    /// use simple_http::http::{Request, Response};
    ///
    /// fn hello_handler(_req: &Request) -> simple_http::Result<Response> {
    ///     Ok(Response::ok("Hello"))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("^/hello$", hello_handler).unwrap();
    /// ```
    pub fn register<H>(&mut self, pattern: &str, handler: H) -> Result<()>
    where
        H: Handler + 'static,
    {
        self.register_arc(pattern, Arc::new(handler))
    }

    /// Igual que [`Router::register`] pero con un handler ya compartido
    pub fn register_arc(&mut self, pattern: &str, handler: Arc<dyn Handler>) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| HttpError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let route = Route {
            pattern: pattern.to_string(),
            regex,
            handler,
        };

        match self.routes.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => *existing = route,
            None => self.routes.push(route),
        }
        Ok(())
    }

    /// Rutas registradas, en orden de registro
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Cantidad de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Nombre con el que se firman las respuestas
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Cambia el nombre con el que se firman las respuestas
    pub fn set_server_name(&mut self, server_name: impl Into<String>) {
        self.server_name = server_name.into();
    }

    /// Elige la ruta para un path según las reglas de coincidencia más larga
    pub fn select(&self, path: &str) -> Option<&Route> {
        let mut best: Option<(usize, &Route)> = None;

        for route in &self.routes {
            let Some(match_len) = route.match_len(path) else {
                continue;
            };

            let better = match best {
                None => true,
                Some((best_len, best_route)) => {
                    match_len > best_len
                        || (match_len == best_len
                            && route.pattern_len() >= best_route.pattern_len())
                }
            };

            if better {
                best = Some((match_len, route));
            }
        }

        best.map(|(_, route)| route)
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si ningún patrón coincide se usa [`HandlerMissingHandler`]. Los errores
    /// del handler se propagan sin convertir.
    pub fn route(&self, request: &Request) -> Result<Response> {
        let path = request.path();

        let mut response = match self.select(path) {
            Some(route) => {
                debug!(path, pattern = %route.pattern, "route selected");
                route.handler.handle(request)?
            }
            None => {
                debug!(path, "no route matches");
                HandlerMissingHandler::new(path).handle(request)?
            }
        };

        self.add_common_headers(&mut response);
        Ok(response)
    }

    /// Agrega headers comunes a todas las respuestas
    ///
    /// La capa de conexión también la usa para sus páginas de error.
    pub fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", &self.server_name);
        response.add_header("Connection", "close");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
