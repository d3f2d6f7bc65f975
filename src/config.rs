//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno. Se
//! construye una sola vez al arrancar y se comparte en modo lectura
//! (`Arc<Config>`) con todos los handlers de conexión.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttp --directory /tmp/files \
//!   --max-connections 256 \
//!   --read-timeout-ms 2000 \
//!   --encodings gzip,deflate
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! MINIHTTP_DIRECTORY=/tmp/files MINIHTTP_PORT=8080 MINIHTTP_ENCODINGS=deflate,gzip ./minihttp
//! ```

use crate::http::ContentEncoding;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp")]
#[command(about = "Servidor HTTP/1.1 mínimo sobre sockets TCP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio raíz de la ruta /files
    #[arg(long, env = "MINIHTTP_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "MINIHTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "MINIHTTP_PORT")]
    pub port: u16,

    // === Conexiones ===

    /// Máximo de conexiones atendidas a la vez; las demás reciben 503
    #[arg(long = "max-connections", default_value = "512", env = "MINIHTTP_MAX_CONNECTIONS")]
    pub max_connections: usize,

    /// Timeout de la lectura del request en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "MINIHTTP_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Tamaño del buffer de la única lectura por conexión
    #[arg(long = "buffer-size", default_value = "1024", env = "MINIHTTP_BUFFER_SIZE")]
    pub buffer_size: usize,

    // === Protocolo ===

    /// Versiones de protocolo aceptadas (las demás reciben 505)
    #[arg(long, value_delimiter = ',', default_values = ["HTTP/1.0", "HTTP/1.1"], env = "MINIHTTP_PROTOCOLS")]
    pub protocols: Vec<String>,

    /// Métodos aceptados (los demás reciben 405)
    #[arg(long, value_delimiter = ',', default_values = ["GET", "PUT", "DELETE", "POST"], env = "MINIHTTP_METHODS")]
    pub methods: Vec<String>,

    /// Codificaciones ofrecidas, en orden de preferencia
    #[arg(long, value_delimiter = ',', default_values = ["gzip"], env = "MINIHTTP_ENCODINGS")]
    pub encodings: Vec<ContentEncoding>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use minihttp::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Raíz del file store; vacía (inutilizable) si no se pasó `--directory`
    pub fn storage_root(&self) -> PathBuf {
        self.directory.clone().unwrap_or_default()
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn accepts_protocol(&self, version: &str) -> bool {
        self.protocols.iter().any(|accepted| accepted == version)
    }

    pub fn accepts_method(&self, method: &str) -> bool {
        self.methods.iter().any(|accepted| accepted == method)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("Max connections must be >= 1".to_string());
        }
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }
        if self.buffer_size == 0 {
            return Err("Buffer size must be >= 1".to_string());
        }
        if self.protocols.is_empty() {
            return Err("At least one protocol version must be accepted".to_string());
        }
        if self.methods.is_empty() {
            return Err("At least one method must be accepted".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            directory = ?self.directory,
            max_connections = self.max_connections,
            read_timeout_ms = self.read_timeout_ms,
            buffer_size = self.buffer_size,
            protocols = ?self.protocols,
            methods = ?self.methods,
            encodings = ?self.encodings,
            "Configuración cargada"
        );
    }
}

impl Default for Config {
    /// Los mismos valores que los defaults del CLI, sin directorio
    fn default() -> Self {
        Self {
            directory: None,
            host: "0.0.0.0".to_string(),
            port: 4221,
            max_connections: 512,
            read_timeout_ms: 5_000,
            buffer_size: 1024,
            protocols: vec!["HTTP/1.0".to_string(), "HTTP/1.1".to_string()],
            methods: ["GET", "PUT", "DELETE", "POST"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            encodings: vec![ContentEncoding::Gzip],
        }
    }
}
