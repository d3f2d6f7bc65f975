//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Tabla fija de rutas, decidida por los segmentos del path:
//!
//! ```text
//! /                    → root        (200)
//! /echo/<valor>        → echo        (200, 422 sin valor)
//! /user-agent          → user-agent  (200, 400 sin header)
//! /files/<nombre>      → files       (GET 200/404, POST 201)
//! cualquier otra cosa  → 404
//! ```
//!
//! Antes de enrutar se valida el protocolo (505) y luego el método (405).
//! Solo se usa el primer segmento después de `echo` / `files`; el resto se
//! ignora.

use crate::config::Config;
use crate::error::ServerError;
use crate::handlers;
use crate::http::{Request, Response, StatusCode};
use crate::storage::FileStore;
use std::sync::Arc;

/// Ruta resuelta a partir del path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    /// Valor a devolver; `None` si el segmento falta o está vacío
    Echo(Option<&'a str>),
    UserAgent,
    /// Nombre del archivo, tal como vino en el path
    Files(Option<&'a str>),
    NotFound,
}

impl<'a> Route<'a> {
    pub fn resolve(request: &'a Request) -> Self {
        if request.path() == "/" {
            return Route::Root;
        }

        match request.segments().as_slice() {
            ["echo", rest @ ..] => {
                Route::Echo(rest.first().copied().filter(|value| !value.is_empty()))
            }
            ["user-agent", ..] => Route::UserAgent,
            ["files", rest @ ..] => Route::Files(rest.first().copied()),
            _ => Route::NotFound,
        }
    }
}

/// Router con la configuración compartida y el file store
pub struct Router {
    config: Arc<Config>,
    store: FileStore,
}

impl Router {
    pub fn new(config: Arc<Config>) -> Self {
        let store = FileStore::new(config.storage_root());
        Self { config, store }
    }

    /// Valida y despacha un request; los errores se convierten en respuestas vacías
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use minihttp::config::Config;
    /// use minihttp::http::{Request, StatusCode};
    /// use minihttp::router::Router;
    ///
    /// let router = Router::new(Arc::new(Config::default()));
    ///
    /// let request = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.handle(&request).body(), b"abc");
    ///
    /// let request = Request::parse(b"GET / HTTP/2.0\r\n\r\n").unwrap();
    /// assert_eq!(router.handle(&request).status(), StatusCode::HttpVersionNotSupported);
    /// ```
    pub fn handle(&self, request: &Request) -> Response {
        match self.route(request) {
            Ok(response) => response,
            Err(err) => {
                if err.is_client_fault() {
                    tracing::warn!(error = %err, "Request rechazado");
                } else {
                    tracing::error!(error = %err, "Error procesando request");
                }
                err.to_response()
            }
        }
    }

    /// Igual que [`Router::handle`] pero sin convertir el error
    pub fn route(&self, request: &Request) -> Result<Response, ServerError> {
        self.validate(request)?;

        match Route::resolve(request) {
            Route::Root => Ok(handlers::root_handler(request)),
            Route::Echo(value) => handlers::echo_handler(request, value, &self.config.encodings),
            Route::UserAgent => handlers::user_agent_handler(request),
            Route::Files(name) => handlers::files_handler(request, name, &self.store),
            Route::NotFound => Ok(Response::new(StatusCode::NotFound)),
        }
    }

    /// Protocolo primero, método después
    fn validate(&self, request: &Request) -> Result<(), ServerError> {
        if !self.config.accepts_protocol(request.version()) {
            return Err(ServerError::UnsupportedProtocolVersion(
                request.version().to_string(),
            ));
        }

        if !self.config.accepts_method(request.method().as_str()) {
            return Err(ServerError::UnsupportedMethod(
                request.method().to_string(),
            ));
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
