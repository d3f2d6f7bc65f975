//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en `host:port`
//! 2. Admite conexiones hasta `max_connections` (el resto recibe 503)
//! 3. Lee y parsea un request por conexión, con timeout
//! 4. Genera y envía la respuesta, y cierra

pub mod limiter;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use limiter::{ConnectionLimiter, ConnectionPermit};
pub use tcp::Server;
