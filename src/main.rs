//! # minihttp - Entry Point
//! src/main.rs
//!
//! Lee la configuración (CLI + env), inicializa el logging y arranca el
//! servidor. Sale con código 1 si la configuración es inválida o si no se
//! puede hacer bind.

use minihttp::config::Config;
use minihttp::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minihttp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("minihttp v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::new();

    if config.directory.is_none() {
        tracing::warn!("No se indicó --directory: las rutas /files responderán 500");
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuración inválida");
        std::process::exit(1);
    }

    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Error fatal");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!(error = %e, "Error fatal");
        std::process::exit(1);
    }
}
