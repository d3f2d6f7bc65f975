//! # Handlers básicos
//! src/handlers/basic.rs
//!
//! `/`, `/echo/<valor>` y `/user-agent`. Responden a cualquier método aceptado.

use crate::error::ServerError;
use crate::http::encoding::{negotiate, ContentEncoding};
use crate::http::{Request, Response, StatusCode};

/// `/` → 200 vacío
pub fn root_handler(_req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// `/echo/<valor>` → el valor como `text/plain`
///
/// Si la negociación elige una codificación, el body va comprimido,
/// `Content-Length` es la longitud comprimida y se agrega `Content-Encoding`.
/// Sin valor (`/echo/` o `/echo`) → 422.
pub fn echo_handler(
    req: &Request,
    value: Option<&str>,
    offered: &[ContentEncoding],
) -> Result<Response, ServerError> {
    let value = value.ok_or(ServerError::MissingEchoValue)?;

    match negotiate(req.header("accept-encoding"), offered) {
        Some(encoding) => {
            let body = encoding
                .encode(value.as_bytes())
                .map_err(ServerError::Encoding)?;

            tracing::debug!(%encoding, original = value.len(), encoded = body.len(), "Echo comprimido");

            Ok(Response::text(body).with_header("Content-Encoding", encoding.as_str()))
        }
        None => Ok(Response::text(value)),
    }
}

/// `/user-agent` → valor del header `User-Agent` (en minúsculas, como lo dejó el parser)
///
/// Sin header → 400.
pub fn user_agent_handler(req: &Request) -> Result<Response, ServerError> {
    let user_agent = req
        .header("user-agent")
        .ok_or(ServerError::MissingUserAgent)?;

    Ok(Response::text(user_agent))
}
