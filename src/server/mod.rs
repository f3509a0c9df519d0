//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, una por request (sin keep-alive)
//! 3. Lanza un thread por conexión que lee el path y responde el archivo

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, ConnectionContext};
pub use tcp::Server;
