//! # Handlers de archivos
//! src/handlers/files.rs
//!
//! `/files/<nombre>` sobre el [`FileStore`]:
//!
//! - `GET`  → contenido del archivo (`application/octet-stream`) o 404
//! - `POST` → escribe el body del request y responde 201
//! - cualquier otro método aceptado → 405
//!
//! Nombres vacíos, `.` y `..` se rechazan con 400 antes de tocar el disco.

use crate::error::ServerError;
use crate::http::{Method, Request, Response, StatusCode};
use crate::storage::FileStore;

pub fn files_handler(
    req: &Request,
    name: Option<&str>,
    store: &FileStore,
) -> Result<Response, ServerError> {
    let name = validate_name(name)?;

    match req.method() {
        Method::GET => get_file(name, store),
        Method::POST => post_file(req, name, store),
        other => Err(ServerError::MethodNotAllowedOnResource {
            method: other.to_string(),
            path: req.path().to_string(),
        }),
    }
}

fn validate_name(name: Option<&str>) -> Result<&str, ServerError> {
    match name {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name),
        other => Err(ServerError::InvalidFileName(
            other.unwrap_or_default().to_string(),
        )),
    }
}

fn get_file(name: &str, store: &FileStore) -> Result<Response, ServerError> {
    match store.find(name)? {
        Some(file) => {
            tracing::info!(file = name, size = file.size, "Archivo servido");
            Ok(Response::octet_stream(file.contents))
        }
        None => {
            tracing::info!(file = name, "Archivo no encontrado");
            Ok(Response::new(StatusCode::NotFound))
        }
    }
}

/// Sin línea vacía en el request no hay body: se escribe un archivo vacío
fn post_file(req: &Request, name: &str, store: &FileStore) -> Result<Response, ServerError> {
    let body = req.body().unwrap_or_default();
    store.write(name, body)?;

    tracing::info!(file = name, bytes = body.len(), "Archivo creado");

    Ok(Response::new(StatusCode::Created))
}
