//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones simultáneas
//! usando threads. Cada conexión se procesa en su propio thread y atiende un
//! único request: se lee, se enruta, se responde y se cierra.

use crate::config::Config;
use crate::error::{HttpError, Result};
use crate::http::{pages, RequestParser, Response};
use crate::router::Router;
use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, error, info, warn};

/// Espera máxima por lectura al descartar bytes pendientes del cliente
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Bytes que se descartan como máximo antes de cerrar el socket
const DRAIN_LIMIT: usize = 1 << 20;

/// Servidor HTTP/1.1 concurrente, un thread por conexión
pub struct Server {
    config: Config,
    router: Arc<Router>,
    parser: Arc<RequestParser>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor a partir de la configuración y un router ya armado
    ///
    /// El nombre del header `Server` y el documento por defecto salen de
    /// `config`.
    pub fn new(config: Config, mut router: Router) -> Self {
        router.set_server_name(config.server_name.clone());
        let parser = RequestParser::new(config.default_document.clone());

        Self {
            config,
            router: Arc::new(router),
            parser: Arc::new(parser),
            listener: None,
        }
    }

    /// Abre el socket de escucha en la dirección configurada
    ///
    /// Con puerto 0 el sistema elige uno libre; consultarlo con
    /// [`Server::local_addr`].
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local = listener.local_addr()?;

        info!(address = %local, "server listening");
        self.listener = Some(listener);
        Ok(local)
    }

    /// Dirección real del socket, si ya se hizo bind
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Acepta conexiones en texto plano hasta que el listener falle
    pub fn run(&mut self) -> io::Result<()> {
        self.run_with(Ok)
    }

    /// Igual que [`Server::run`], pero envolviendo cada socket aceptado
    ///
    /// `wrap` corre dentro del thread de la conexión, así un handshake lento
    /// (por ejemplo TLS) no bloquea el accept loop. Si `wrap` falla la
    /// conexión se descarta.
    pub fn run_with<F, S>(&mut self, wrap: F) -> io::Result<()>
    where
        F: Fn(TcpStream) -> io::Result<S> + Send + Sync + 'static,
        S: Read + Write,
    {
        if self.listener.is_none() {
            self.bind()?;
        }
        let Some(listener) = self.listener.as_ref() else {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "listener not bound"));
        };

        info!("concurrent mode: one thread per connection");
        let wrap = Arc::new(wrap);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let parser = Arc::clone(&self.parser);
                    let wrap = Arc::clone(&wrap);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    debug!(peer = %peer_addr, "new connection");

                    let spawned = thread::Builder::new()
                        .name(format!("conn-{}", peer_addr))
                        .spawn(move || {
                            let span = debug_span!("connection", peer = %peer_addr);
                            let _enter = span.enter();

                            // Copia del socket crudo para el cierre, `wrap` se queda el original
                            let raw = stream.try_clone();

                            let result = (*wrap)(stream)
                                .map_err(HttpError::from)
                                .and_then(|mut stream| {
                                    handle_connection(&mut stream, &router, &parser)
                                });

                            match result {
                                Ok(()) => {
                                    if let Ok(raw) = raw {
                                        close_gracefully(&raw);
                                    }
                                }
                                Err(e) => debug!("connection dropped: {}", e),
                            }
                        });

                    if let Err(e) = spawned {
                        error!("could not spawn connection thread: {}", e);
                    }
                }
                Err(e) => {
                    warn!("error accepting connection: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Atiende una conexión completa: un request, una response
///
/// - Request mal formado: se responde 400 con el motivo.
/// - Error del handler: se responde 500 y se registra.
/// - Error de I/O: no se responde nada y el error se devuelve.
pub fn handle_connection<S>(stream: &mut S, router: &Router, parser: &RequestParser) -> Result<()>
where
    S: Read + Write,
{
    let start = Instant::now();

    let parsed = {
        let mut reader = BufReader::new(&mut *stream);
        parser.parse(&mut reader)
    };

    let (mut response, path) = match parsed {
        Ok(request) => {
            let path = request.path().to_string();
            debug!(method = %request.method(), path = %path, "request received");

            let response = match router.route(&request) {
                Ok(response) => response,
                Err(e) => {
                    error!(path = %path, "handler failed: {}", e);
                    error_page(router, pages::internal_server_error())
                }
            };
            (response, path)
        }
        Err(HttpError::Io(e)) => {
            debug!("could not read request: {}", e);
            return Err(HttpError::Io(e));
        }
        Err(e) if e.is_client_error() => {
            warn!("parse error: {}", e);
            (error_page(router, pages::bad_request(&e.to_string())), String::new())
        }
        Err(e) => {
            error!("unexpected error while reading request: {}", e);
            (error_page(router, pages::internal_server_error()), String::new())
        }
    };

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    info!(
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "response sent"
    );

    Ok(())
}

/// Cierra la mitad de escritura y descarta lo que el cliente aún tenga en
/// vuelo, así el kernel no contesta con RST a bytes sin leer
///
/// Se corta al llegar a EOF, a [`DRAIN_TIMEOUT`] sin datos o a [`DRAIN_LIMIT`].
fn close_gracefully(stream: &TcpStream) {
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }
    if stream.set_read_timeout(Some(DRAIN_TIMEOUT)).is_err() {
        return;
    }

    let mut reader = stream;
    let mut sink = [0u8; 8192];
    let mut drained = 0;

    while drained < DRAIN_LIMIT {
        match reader.read(&mut sink) {
            Ok(0) | Err(_) => break,
            Ok(n) => drained += n,
        }
    }

    if drained > 0 {
        debug!(bytes = drained, "discarded unread request bytes");
    }
}

fn error_page(router: &Router, mut response: Response) -> Response {
    router.add_common_headers(&mut response);
    response
}
