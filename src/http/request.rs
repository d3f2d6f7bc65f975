//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser HTTP escrito desde cero. Trabaja sobre el buffer de una única
//! lectura del socket: no hay reensamblado de requests que lleguen en varios
//! paquetes. Solo el head (request line y headers) tiene que ser UTF-8; el
//! body se conserva como bytes.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/number HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! 1234
//! ```
//!
//! ## Reglas
//!
//! 1. El head se divide por `\n` y cada línea se recorta (`trim`).
//! 2. **Request Line**: exactamente tres tokens separados por un espacio.
//! 3. **Headers**: `Name: Value` separados por el primer `:`; nombre y valor
//!    se guardan en minúsculas y en orden de llegada (los duplicados se conservan).
//! 4. **Línea vacía**: termina los headers; lo que sigue es el body.
//! 5. **Body**: los bytes que siguen a la línea vacía, sin tocar.

use thiserror::Error;

/// Métodos HTTP
///
/// El parser nunca rechaza un método: cualquier token desconocido queda en
/// [`Method::Extension`] y es el servidor quien decide si lo acepta (405).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,

    /// Cualquier otro token (ej: `BREW`)
    Extension(String),
}

impl Method {
    /// Convierte el token de la request line en un método.
    ///
    /// La comparación distingue mayúsculas: `get` es una extensión, no `GET`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Extension(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
            Method::Extension(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Buffer vacío o solo con espacios
    #[error("Empty request")]
    EmptyRequest,

    /// La request line o algún header no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente tres tokens
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Línea de header sin `:`
    #[error("Malformed header line: {0:?}")]
    MalformedHeaderLine(String),
}

/// Request HTTP parseado
///
/// Vive lo que dura la conexión que lo produjo.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Path tal como llegó (ej: "/echo/abc")
    path: String,

    /// Versión del protocolo (ej: "HTTP/1.1"); se valida en el servidor, no aquí
    version: String,

    /// Headers en orden de llegada, nombre y valor en minúsculas
    headers: Vec<(String, String)>,

    /// Presente solo si se encontró la línea vacía que cierra los headers
    body: Option<Vec<u8>>,
}

impl Request {
    /// Parsea un request desde los bytes leídos del socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("Host"), Some("localhost:4221"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest);
        }

        let (first, mut rest) = Self::split_line(buffer);
        let (method, path, version) = Self::parse_request_line(Self::decode_line(first)?)?;

        let mut headers = Vec::new();
        let mut body = None;

        while let Some(remaining) = rest {
            let (line, next) = Self::split_line(remaining);
            let line = Self::decode_line(line)?;

            if line.is_empty() {
                body = Some(next.unwrap_or_default().to_vec());
                break;
            }

            headers.push(Self::parse_header_line(line)?);
            rest = next;
        }

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Corta en el primer `\n`; `None` si la línea no termina en `\n`
    fn split_line(buffer: &[u8]) -> (&[u8], Option<&[u8]>) {
        match buffer.iter().position(|&byte| byte == b'\n') {
            Some(pos) => (&buffer[..pos], Some(&buffer[pos + 1..])),
            None => (buffer, None),
        }
    }

    fn decode_line(line: &[u8]) -> Result<&str, ParseError> {
        std::str::from_utf8(line)
            .map(str::trim)
            .map_err(|_| ParseError::InvalidEncoding)
    }

    /// Formato: `METHOD /path VERSION`, separados por un único espacio
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        match parts.as_slice() {
            [method, path, version] => Ok((
                Method::from_token(method),
                path.to_string(),
                version.to_string(),
            )),
            _ => Err(ParseError::MalformedRequestLine(line.to_string())),
        }
    }

    /// Separa por el primer `:`, así `Host: localhost:4221` conserva el puerto
    fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeaderLine(line.to_string()))?;

        Ok((
            name.trim().to_lowercase(),
            value.trim().to_lowercase(),
        ))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Segmentos del path sin la barra inicial
    ///
    /// `/echo/abc` → `["echo", "abc"]`, `/echo/` → `["echo", ""]`.
    /// Un path que no empieza con `/` no tiene segmentos.
    pub fn segments(&self) -> Vec<&str> {
        match self.path.strip_prefix('/') {
            Some(rest) => rest.split('/').collect(),
            None => Vec::new(),
        }
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers, en orden de llegada
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Primer header con ese nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene el body del request, si hubo línea vacía
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.version(), "HTTP/1.1");
        assert!(request.headers().is_empty());
        assert_eq!(request.body(), Some(&b""[..]));
    }

    #[test]
    fn test_parse_without_blank_line_has_no_body() {
        let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_parse_headers_are_lowercased() {
        let raw = b"GET / HTTP/1.1\r\nUser-Agent: Foobar/1.2.3\r\nACCEPT-Encoding: GZIP\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(
            request.headers(),
            &[
                ("user-agent".to_string(), "foobar/1.2.3".to_string()),
                ("accept-encoding".to_string(), "gzip".to_string()),
            ]
        );
        assert_eq!(request.header("User-Agent"), Some("foobar/1.2.3"));
    }

    #[test]
    fn test_parse_header_splits_on_first_colon() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("host"), Some("localhost:4221"));
    }

    #[test]
    fn test_parse_duplicate_headers_keep_order() {
        let raw = b"GET / HTTP/1.1\r\nX-Tag: one\r\nX-Tag: two\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("x-tag"), Some("one"));
        assert_eq!(request.headers()[1].1, "two");
    }

    #[test]
    fn test_parse_body() {
        let raw = b"POST /files/number HTTP/1.1\r\nContent-Type: application/octet-stream\r\n\r\n1234";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body(), Some(&b"1234"[..]));
    }

    #[test]
    fn test_parse_multiline_body_is_kept_verbatim() {
        let raw = b"POST /files/a HTTP/1.1\r\n\r\nfirst\r\nsecond\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.body(), Some(&b"first\r\nsecond\r\n"[..]));
    }

    #[test]
    fn test_parse_binary_body() {
        let raw = b"POST /files/bin HTTP/1.1\r\nHost: x\r\n\r\n\x00\xff\xfe\x80";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("host"), Some("x"));
        assert_eq!(request.body(), Some(&b"\x00\xff\xfe\x80"[..]));
    }

    #[test]
    fn test_parse_unknown_method_is_extension() {
        let raw = b"BREW /pot HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), &Method::Extension("BREW".to_string()));
        assert_eq!(request.method().as_str(), "BREW");
    }

    #[test]
    fn test_parse_keeps_unsupported_version() {
        let raw = b"GET / HTTP/2.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.version(), "HTTP/2.0");
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(Request::parse(b"").unwrap_err(), ParseError::EmptyRequest);
        assert_eq!(Request::parse(b"  \r\n").unwrap_err(), ParseError::EmptyRequest);
    }

    #[test]
    fn test_invalid_request_line() {
        let result = Request::parse(b"GET\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));

        let result = Request::parse(b"GET / HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_invalid_header_line() {
        let result = Request::parse(b"GET / HTTP/1.1\r\nnot-a-header\r\n\r\n");
        assert_eq!(
            result.unwrap_err(),
            ParseError::MalformedHeaderLine("not-a-header".to_string())
        );
    }

    #[test]
    fn test_invalid_utf8_in_head() {
        let result = Request::parse(b"GET /\xff HTTP/1.1\r\n\r\n");
        assert_eq!(result.unwrap_err(), ParseError::InvalidEncoding);

        let result = Request::parse(b"GET / HTTP/1.1\r\nX-Bin: \xfe\r\n\r\n");
        assert_eq!(result.unwrap_err(), ParseError::InvalidEncoding);
    }

    #[test]
    fn test_segments() {
        let request = Request::parse(b"GET /echo/abc/cde HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.segments(), vec!["echo", "abc", "cde"]);

        let request = Request::parse(b"GET /echo/ HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.segments(), vec!["echo", ""]);

        let request = Request::parse(b"GET * HTTP/1.1\r\n\r\n").unwrap();
        assert!(request.segments().is_empty());
    }
}
