//! # minihttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero sobre `std::net`: parsea
//! el request a mano, lo enruta contra un conjunto fijo de paths y arma los
//! bytes de la respuesta.
//!
//! ## Arquitectura
//!
//! ```text
//! TcpListener → limiter → thread → Request::parse → Router → handler → Response::to_bytes
//! ```
//!
//! - `http`: parsing, respuestas, status codes y negociación de encoding
//! - `router`: validación de protocolo/método y tabla fija de rutas
//! - `handlers`: root, echo, user-agent y files
//! - `storage`: file store sobre el directorio `--directory`
//! - `server`: listener, control de admisión y thread por conexión
//! - `config`: CLI y variables de entorno
//! - `error`: errores y su traducción a códigos HTTP
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::Config;
//! use minihttp::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod storage;
