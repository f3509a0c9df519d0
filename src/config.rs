//! # Configuración del Servidor
//! src/config.rs
//!
//! La configuración se arma una sola vez al arrancar, desde tres fuentes
//! (de mayor a menor prioridad):
//!
//! 1. Argumentos CLI / variables de entorno
//! 2. Archivo `appsettings.json` opcional (`Port`, `Directory`)
//! 3. Defaults: puerto 80, content root = directorio de trabajo
//!
//! El resultado es un [`ServerConfig`] de solo lectura que comparten todos
//! los handlers.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 8080 --root /srv/www
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! STATIC_PORT=8080 STATIC_ROOT=/srv/www ./static_server
//! ```
//!
//! ### appsettings.json
//! ```json
//! { "Port": 8080, "Directory": "/srv/www" }
//! ```

use crate::error::{Result, ServerError};
use crate::http::request::READ_BUFFER_SIZE;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Puerto por defecto si nadie lo especifica
pub const DEFAULT_PORT: u16 = 80;

/// Máximo por defecto de bytes leídos antes de encontrar el path
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8192;

/// Argumentos de línea de comandos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP mínimo de archivos estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor [default: 80]
    #[arg(short, long, env = "STATIC_PORT")]
    pub port: Option<u16>,

    /// Interfaz en la que escucha (0.0.0.0 = todas)
    #[arg(long, default_value = "0.0.0.0", env = "STATIC_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos servidos [default: directorio actual]
    #[arg(short, long, env = "STATIC_ROOT")]
    pub root: Option<PathBuf>,

    /// Archivo JSON opcional con `Port` y `Directory`
    #[arg(long, default_value = "appsettings.json", env = "STATIC_SETTINGS")]
    pub settings: PathBuf,

    /// Máximo de bytes a leer buscando el path del request
    #[arg(long = "max-request-bytes", default_value = "8192", env = "STATIC_MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "STATIC_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

/// Contenido de `appsettings.json`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub port: Option<u16>,
    pub directory: Option<PathBuf>,
}

impl Settings {
    /// Carga el archivo de settings
    ///
    /// Un archivo inexistente no es error (retorna `None`); uno ilegible o
    /// con JSON inválido sí.
    pub fn load(path: &Path) -> Result<Option<Settings>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "sin archivo de settings");
                return Ok(None);
            }
            Err(source) => {
                return Err(ServerError::SettingsRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ServerError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Configuración resuelta, inmutable durante toda la vida del proceso
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Content root canónico (absoluto, sin symlinks ni `..`)
    pub content_root: PathBuf,
    pub max_request_bytes: usize,
    pub read_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Configuración con defaults para un content root dado
    ///
    /// El root se canonicaliza aquí; falla si no existe o no es directorio.
    pub fn new(content_root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            content_root: canonical_root(content_root.as_ref())?,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            read_timeout: None,
        })
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```no_run
    /// use static_server::config::ServerConfig;
    ///
    /// let config = ServerConfig::new("/srv/www").unwrap();
    /// assert_eq!(config.address(), "0.0.0.0:80");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loguea un resumen de la configuración
    pub fn log_summary(&self) {
        info!("Address:      {}", self.address());
        info!("Content root: {}", self.content_root.display());
        info!("Max request:  {} bytes", self.max_request_bytes);
        match self.read_timeout {
            Some(timeout) => info!("Read timeout: {} ms", timeout.as_millis()),
            None => info!("Read timeout: disabled"),
        }
    }
}

impl Config {
    /// Parsea argumentos CLI y variables de entorno
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida los valores que no dependen del filesystem
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::InvalidConfig("el host no puede estar vacío".to_string()));
        }
        if self.max_request_bytes < READ_BUFFER_SIZE {
            return Err(ServerError::InvalidConfig(format!(
                "max-request-bytes debe ser >= {}",
                READ_BUFFER_SIZE
            )));
        }
        Ok(())
    }

    /// Combina CLI, settings y defaults en un [`ServerConfig`]
    pub fn resolve(&self) -> Result<ServerConfig> {
        self.validate()?;

        let settings = Settings::load(&self.settings)?.unwrap_or_default();

        let port = self.port.or(settings.port).unwrap_or(DEFAULT_PORT);

        let root = match self.root.clone().or(settings.directory) {
            Some(root) => root,
            None => std::env::current_dir().map_err(|source| ServerError::ContentRoot {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let read_timeout = match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        Ok(ServerConfig {
            host: self.host.clone(),
            port,
            content_root: canonical_root(&root)?,
            max_request_bytes: self.max_request_bytes,
            read_timeout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: None,
            host: "0.0.0.0".to_string(),
            root: None,
            settings: PathBuf::from("appsettings.json"),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            read_timeout_ms: 0,
        }
    }
}

/// Canonicaliza el content root y verifica que sea un directorio
fn canonical_root(root: &Path) -> Result<PathBuf> {
    let canonical = root.canonicalize().map_err(|source| ServerError::ContentRoot {
        path: root.to_path_buf(),
        source,
    })?;

    if !canonical.is_dir() {
        return Err(ServerError::NotADirectory(canonical));
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with(dir: &TempDir) -> Config {
        Config {
            root: Some(dir.path().to_path_buf()),
            settings: dir.path().join("appsettings.json"),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_request_bytes, 8192);
        assert_eq!(config.read_timeout_ms, 0);
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_validate_max_request_too_small() {
        let mut config = Config::default();
        config.max_request_bytes = 100;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ServerError::InvalidConfig(_)));
        assert!(err.to_string().contains("debe ser >= 1024"));
    }

    #[test]
    fn test_resolve_defaults_port_80() {
        let dir = TempDir::new().unwrap();
        let resolved = config_with(&dir).resolve().unwrap();

        assert_eq!(resolved.port, 80);
        assert_eq!(resolved.content_root, dir.path().canonicalize().unwrap());
        assert_eq!(resolved.read_timeout, None);
        assert_eq!(resolved.address(), "0.0.0.0:80");
    }

    #[test]
    fn test_resolve_uses_settings_file() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("site");
        fs::create_dir(&site).unwrap();
        let json = format!(
            r#"{{"Port": 8081, "Directory": {}}}"#,
            serde_json::to_string(&site.to_string_lossy()).unwrap()
        );
        fs::write(dir.path().join("appsettings.json"), json).unwrap();

        let mut config = config_with(&dir);
        config.root = None;
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.port, 8081);
        assert_eq!(resolved.content_root, site.canonicalize().unwrap());
    }

    #[test]
    fn test_cli_overrides_settings_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("appsettings.json"), r#"{"Port": 8081}"#).unwrap();

        let mut config = config_with(&dir);
        config.port = Some(9000);
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.port, 9000);
    }

    #[test]
    fn test_settings_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_settings_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("appsettings.json");
        fs::write(&path, r#"{"Logging": {"Level": "Debug"}, "Port": 81}"#).unwrap();

        let loaded = Settings::load(&path).unwrap().unwrap();
        assert_eq!(loaded.port, Some(81));
        assert_eq!(loaded.directory, None);
    }

    #[test]
    fn test_settings_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("appsettings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(ServerError::SettingsParse { .. })));
    }

    #[test]
    fn test_resolve_missing_root() {
        let dir = TempDir::new().unwrap();
        let mut config = config_with(&dir);
        config.root = Some(dir.path().join("does-not-exist"));

        assert!(matches!(config.resolve(), Err(ServerError::ContentRoot { .. })));
    }

    #[test]
    fn test_resolve_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut config = config_with(&dir);
        config.root = Some(file);

        assert!(matches!(config.resolve(), Err(ServerError::NotADirectory(_))));
    }

    #[test]
    fn test_resolve_read_timeout() {
        let dir = TempDir::new().unwrap();
        let mut config = config_with(&dir);
        config.read_timeout_ms = 1500;

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.read_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_server_config_new() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::new(dir.path()).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
        assert!(config.content_root.is_absolute());
    }
}
