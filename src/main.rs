//! # Static Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el loop de
//! accept. Un error de configuración o de bind termina el proceso.

use static_server::config::Config;
use static_server::server::Server;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let config = match Config::new().resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("💥 Error de configuración: {}", e);
            std::process::exit(1);
        }
    };
    config.log_summary();

    let mut server = Server::new(config);

    // Esto bloquea el thread principal
    if let Err(e) = server.run() {
        error!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
