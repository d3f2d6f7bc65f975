//! # Módulo HTTP
//!
//! Subconjunto de HTTP/1.1 implementado desde cero, sin librerías de alto
//! nivel:
//!
//! - Parsing de requests (una sola lectura del socket)
//! - Construcción de responses byte a byte
//! - Códigos de estado
//! - Negociación de `Content-Encoding`
//!
//! No hay chunked transfer encoding, ni keep-alive, ni pipelining: cada
//! conexión lleva exactamente un request y una respuesta.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Negociación de Content-Encoding
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

pub use encoding::ContentEncoding;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
