//! # Negociación de Content-Encoding
//! src/http/encoding.rs
//!
//! El cliente anuncia en `Accept-Encoding` las codificaciones que entiende y el
//! servidor tiene su propia lista ordenada por preferencia. Gana la **primera
//! de la lista del servidor** que el cliente también acepte; el orden del
//! cliente no importa.
//!
//! ```text
//! Accept-Encoding: deflate, gzip     servidor: [gzip, deflate]   →  gzip
//! Accept-Encoding: br                servidor: [gzip]            →  ninguna
//! ```
//!
//! No se interpretan parámetros como `gzip;q=0.5`: el token se compara tal cual.

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::Write;

/// Codificaciones que el servidor sabe producir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
    Deflate,
}

impl ContentEncoding {
    /// Token tal como aparece en los headers
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Deflate => "deflate",
        }
    }

    /// Comprime `data` con esta codificación
    ///
    /// `deflate` en HTTP es el formato zlib (RFC 1950), no deflate crudo.
    pub fn encode(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            ContentEncoding::Deflate => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }
}

impl std::str::FromStr for ContentEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gzip" => Ok(ContentEncoding::Gzip),
            "deflate" => Ok(ContentEncoding::Deflate),
            other => Err(format!("unsupported content encoding: {}", other)),
        }
    }
}

impl std::fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elige la codificación de la respuesta
///
/// `None` significa "ninguna": header ausente o sin coincidencias. En ese caso
/// no se agrega `Content-Encoding` y el body va sin modificar.
///
/// # Ejemplo
/// ```
/// use minihttp::http::encoding::{negotiate, ContentEncoding};
///
/// let offered = [ContentEncoding::Gzip];
/// assert_eq!(negotiate(Some("br, GZIP"), &offered), Some(ContentEncoding::Gzip));
/// assert_eq!(negotiate(Some("br"), &offered), None);
/// assert_eq!(negotiate(None, &offered), None);
/// ```
pub fn negotiate(
    accept_encoding: Option<&str>,
    offered: &[ContentEncoding],
) -> Option<ContentEncoding> {
    let header = accept_encoding?;
    let client: Vec<&str> = header.split(',').map(str::trim).collect();

    offered.iter().copied().find(|encoding| {
        client
            .iter()
            .any(|token| token.eq_ignore_ascii_case(encoding.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::{GzDecoder, ZlibDecoder};
    use std::io::Read;

    #[test]
    fn test_negotiate_absent_header() {
        assert_eq!(negotiate(None, &[ContentEncoding::Gzip]), None);
    }

    #[test]
    fn test_negotiate_single_match() {
        assert_eq!(
            negotiate(Some("gzip"), &[ContentEncoding::Gzip]),
            Some(ContentEncoding::Gzip)
        );
    }

    #[test]
    fn test_negotiate_no_overlap() {
        assert_eq!(negotiate(Some("br"), &[ContentEncoding::Gzip]), None);
        assert_eq!(negotiate(Some(""), &[ContentEncoding::Gzip]), None);
    }

    #[test]
    fn test_negotiate_trims_and_ignores_case() {
        assert_eq!(
            negotiate(Some("invalid-1,  GZip ,invalid-2"), &[ContentEncoding::Gzip]),
            Some(ContentEncoding::Gzip)
        );
    }

    #[test]
    fn test_negotiate_server_preference_wins() {
        let offered = [ContentEncoding::Gzip, ContentEncoding::Deflate];
        assert_eq!(
            negotiate(Some("deflate, gzip"), &offered),
            Some(ContentEncoding::Gzip)
        );

        let offered = [ContentEncoding::Deflate, ContentEncoding::Gzip];
        assert_eq!(
            negotiate(Some("gzip, deflate"), &offered),
            Some(ContentEncoding::Deflate)
        );
    }

    #[test]
    fn test_negotiate_nothing_offered() {
        assert_eq!(negotiate(Some("gzip"), &[]), None);
    }

    #[test]
    fn test_parameters_are_not_interpreted() {
        assert_eq!(negotiate(Some("gzip;q=1.0"), &[ContentEncoding::Gzip]), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("gzip".parse::<ContentEncoding>(), Ok(ContentEncoding::Gzip));
        assert_eq!(" Deflate ".parse::<ContentEncoding>(), Ok(ContentEncoding::Deflate));
        assert!("br".parse::<ContentEncoding>().is_err());
    }

    #[test]
    fn test_gzip_encode() {
        let compressed = ContentEncoding::Gzip.encode(b"abc").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = String::new();
        GzDecoder::new(&compressed[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn test_deflate_encode() {
        let compressed = ContentEncoding::Deflate.encode(b"hello hello hello").unwrap();

        let mut decoded = String::new();
        ZlibDecoder::new(&compressed[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "hello hello hello");
    }
}
