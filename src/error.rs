//! # Errores del Servidor
//! src/error.rs
//!
//! Todo error que ocurre dentro de una conexión termina aquí y se traduce a un
//! código HTTP con [`ServerError::status`]. Solo `Bind` es fatal para el
//! proceso; el resto afecta únicamente a la conexión que lo produjo.

use crate::http::{ParseError, Response, StatusCode};
use crate::storage::FileStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Request malformado (request line, header o bytes inválidos)
    #[error("invalid request: {0}")]
    Parse(#[from] ParseError),

    #[error("HTTP version not supported: {0}")]
    UnsupportedProtocolVersion(String),

    #[error("method not allowed: {0}")]
    UnsupportedMethod(String),

    /// `/echo/` sin segmento de valor
    #[error("missing echo value")]
    MissingEchoValue,

    /// `/user-agent` sin header `User-Agent`
    #[error("missing User-Agent header")]
    MissingUserAgent,

    /// `/files/` sin nombre, o `.` / `..`
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Método aceptado por el servidor pero no soportado por el recurso
    #[error("method {method} not supported on {path}")]
    MethodNotAllowedOnResource { method: String, path: String },

    #[error(transparent)]
    FileIo(#[from] FileStoreError),

    /// Fallo al comprimir el body de la respuesta
    #[error("cannot encode response body: {0}")]
    Encoding(std::io::Error),

    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Código HTTP con el que se responde al cliente
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Parse(_) => StatusCode::BadRequest,
            ServerError::UnsupportedProtocolVersion(_) => StatusCode::HttpVersionNotSupported,
            ServerError::UnsupportedMethod(_) => StatusCode::MethodNotAllowed,
            ServerError::MissingEchoValue => StatusCode::UnprocessableEntity,
            ServerError::MissingUserAgent => StatusCode::BadRequest,
            ServerError::InvalidFileName(_) => StatusCode::BadRequest,
            ServerError::MethodNotAllowedOnResource { .. } => StatusCode::MethodNotAllowed,
            ServerError::FileIo(_)
            | ServerError::Encoding(_)
            | ServerError::Bind { .. }
            | ServerError::Io(_) => StatusCode::InternalServerError,
        }
    }

    /// El problema está en el request (4xx y 505): se registra como warning
    pub fn is_client_fault(&self) -> bool {
        self.status().is_client_error()
            || matches!(self, ServerError::UnsupportedProtocolVersion(_))
    }

    /// Respuesta vacía para el cliente: el detalle solo va al log
    pub fn to_response(&self) -> Response {
        Response::from(self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_fault() {
        assert!(ServerError::UnsupportedProtocolVersion("HTTP/2.0".into()).is_client_fault());
        assert!(ServerError::UnsupportedMethod("PATCH".into()).is_client_fault());
        assert!(ServerError::MissingEchoValue.is_client_fault());
        assert!(ServerError::Parse(ParseError::EmptyRequest).is_client_fault());
        assert!(!ServerError::Encoding(std::io::Error::other("boom")).is_client_fault());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::Parse(ParseError::EmptyRequest).status(),
            StatusCode::BadRequest
        );
        assert_eq!(
            ServerError::UnsupportedProtocolVersion("HTTP/2.0".into()).status(),
            StatusCode::HttpVersionNotSupported
        );
        assert_eq!(
            ServerError::UnsupportedMethod("BREW".into()).status(),
            StatusCode::MethodNotAllowed
        );
        assert_eq!(ServerError::MissingEchoValue.status(), StatusCode::UnprocessableEntity);
        assert_eq!(ServerError::MissingUserAgent.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_file_io_is_internal_error() {
        let err = ServerError::from(FileStoreError::Read {
            path: "/tmp/x".into(),
            source: std::io::Error::other("disk on fire"),
        });

        assert_eq!(err.status(), StatusCode::InternalServerError);
    }

    #[test]
    fn test_response_hides_details() {
        let err = ServerError::Io(std::io::Error::other("secret path /etc/shadow"));
        let bytes = err.to_response().to_bytes();

        assert_eq!(bytes, b"HTTP/1.1 500 Internal Server Error\r\n\r\n");
    }
}
