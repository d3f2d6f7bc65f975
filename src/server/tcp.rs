//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Un thread por conexión, con dos límites:
//!
//! - como mucho `max_connections` threads atendiendo requests; la conexión
//!   que llega con el cupo lleno recibe `503` desde un thread aparte que
//!   solo drena lo que mande el cliente antes de cerrar
//! - la única lectura del request tiene timeout (`read_timeout_ms`)
//!
//! Cada conexión hace exactamente una lectura y una escritura. No hay
//! keep-alive: al terminar el handler el socket se cierra.

use crate::config::Config;
use crate::error::ServerError;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use crate::server::limiter::ConnectionLimiter;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    router: Arc<Router>,
    limiter: ConnectionLimiter,
    listener: TcpListener,
}

impl Server {
    /// Hace bind en `config.address()`
    ///
    /// Es el único error fatal del proceso.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        let limiter = ConnectionLimiter::new(config.max_connections);
        let router = Router::new(Arc::new(config));

        Ok(Self {
            router: Arc::new(router),
            limiter,
            listener,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Acepta conexiones para siempre
    ///
    /// Un error al aceptar se registra y el loop sigue.
    pub fn run(&self) -> Result<(), ServerError> {
        let address = self.local_addr()?;
        tracing::info!(
            %address,
            max_connections = self.limiter.max_connections(),
            "Servidor escuchando (un thread por conexión)"
        );

        let mut next_id: u64 = 0;

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    next_id = next_id.wrapping_add(1);
                    self.dispatch(stream, next_id);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error al aceptar conexión");
                }
            }
        }

        Ok(())
    }

    fn dispatch(&self, stream: TcpStream, id: u64) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let Some(permit) = self.limiter.try_acquire() else {
            tracing::warn!(%peer, active = self.limiter.active(), "Cupo de conexiones lleno, respondiendo 503");

            let timeout = self.router.config().read_timeout();
            let spawned = thread::Builder::new()
                .name(format!("reject-{}", id))
                .spawn(move || Self::reject(stream, timeout));

            if let Err(e) = spawned {
                tracing::error!(error = %e, "No se pudo crear el thread de rechazo");
            }
            return;
        };

        tracing::debug!(%peer, id, "Nueva conexión (spawning thread)");

        let router = Arc::clone(&self.router);
        let spawned = thread::Builder::new()
            .name(format!("conn-{}", id))
            .spawn(move || {
                let _permit = permit;
                let span = tracing::info_span!("conn", id, %peer);
                let _enter = span.enter();

                if let Err(e) = Self::handle_connection(stream, &router) {
                    tracing::error!(error = %e, "Error en thread de conexión");
                }
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "No se pudo crear el thread de conexión");
        }
    }

    /// Escribe el `503`, cierra la escritura y lee hasta que el cliente cierre
    ///
    /// Cerrar el socket con el request todavía sin leer hace que el kernel
    /// mande RST y el cliente pierda el `503`.
    fn reject(mut stream: TcpStream, timeout: Duration) {
        let bytes = Response::from(StatusCode::ServiceUnavailable).to_bytes();
        let result = stream
            .set_read_timeout(Some(timeout))
            .and_then(|_| stream.set_write_timeout(Some(timeout)))
            .and_then(|_| stream.write_all(&bytes))
            .and_then(|_| stream.shutdown(Shutdown::Write));

        if let Err(e) = result {
            tracing::debug!(error = %e, "No se pudo enviar el 503");
            return;
        }

        let mut sink = [0u8; 512];
        loop {
            match stream.read(&mut sink) {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
    }

    /// Atiende una conexión de punta a punta: una lectura, una escritura
    pub fn handle_connection(mut stream: TcpStream, router: &Router) -> Result<(), ServerError> {
        let start = Instant::now();
        let config = router.config();

        stream.set_read_timeout(Some(config.read_timeout()))?;
        stream.set_write_timeout(Some(config.read_timeout()))?;

        let mut buffer = vec![0u8; config.buffer_size];
        let bytes_read = match stream.read(&mut buffer) {
            Ok(0) => {
                tracing::debug!("Conexión cerrada sin datos");
                return Ok(());
            }
            Ok(n) => n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                tracing::warn!(timeout_ms = config.read_timeout_ms, "Timeout leyendo el request");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(bytes = bytes_read, "Request leído");

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                tracing::info!(
                    method = %request.method(),
                    path = request.path(),
                    version = request.version(),
                    "Request"
                );
                router.handle(&request)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Parse error");
                ServerError::from(e).to_response()
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        tracing::info!(
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Respuesta enviada"
        );

        Ok(())
    }
}
