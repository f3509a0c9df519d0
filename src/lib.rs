//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP mínimo de archivos estáticos: acepta conexiones TCP, extrae
//! el path del request line, lo resuelve dentro de un content root y
//! responde con el archivo (200) o con 404.
//!
//! ## Arquitectura
//!
//! - `config`: CLI, `appsettings.json` y la configuración resuelta
//! - `error`: errores fatales de arranque
//! - `http`: lectura del path, status codes y construcción de respuestas
//! - `resolver`: mapeo URL → archivo con guardia contra path traversal
//! - `server`: loop de accept y manejo de cada conexión
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::ServerConfig;
//! use static_server::server::Server;
//!
//! let config = ServerConfig::new("/srv/www").expect("content root inválido");
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod resolver;
pub mod server;

pub use error::{Result, ServerError};
