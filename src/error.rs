//! # Errores del Servidor
//! src/error.rs
//!
//! Solo los errores fatales de arranque llegan a este tipo. Los errores de
//! una conexión individual se quedan en `std::io::Result` dentro del thread
//! que la maneja y nunca afectan al loop de accept.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo hacer bind del puerto (en uso, permisos, ...)
    #[error("no se pudo escuchar en {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// El content root no existe o no se puede resolver
    #[error("content root inválido {}: {source}", .path.display())]
    ContentRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("el content root no es un directorio: {}", .0.display())]
    NotADirectory(PathBuf),

    /// El archivo de settings existe pero no se pudo leer
    #[error("no se pudo leer {}: {source}", .path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// El archivo de settings no es JSON válido
    #[error("settings inválidos en {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuración inválida: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
