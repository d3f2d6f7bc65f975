//! # Handlers
//!
//! Cada handler recibe el [`Request`](crate::http::Request) ya validado y lo
//! que necesita de la ruta, y retorna la respuesta o un
//! [`ServerError`](crate::error::ServerError) que el router convierte en el
//! código HTTP correspondiente.
//!
//! - **basic**: `/`, `/echo`, `/user-agent`
//! - **files**: `/files` sobre el file store

pub mod basic;
pub mod files;

pub use basic::*;
pub use files::*;
