//! # Resolución de Paths
//! src/resolver.rs
//!
//! Mapea el path de la URL a un archivo dentro del content root:
//!
//! ```text
//! "/docs/a.html" → <root>/docs/a.html → canonicalize → ¿dentro de root? → leer
//! ```
//!
//! La guardia de traversal compara componentes de paths canónicos
//! (`Path::starts_with`), no prefijos de strings: con root `/srv/site`, el
//! path `/srv/site-other/secret` se rechaza.
//!
//! Cualquier fallo (no existe, es directorio, fuera del root, no se puede
//! leer) termina en [`Resolution::NotFound`]; el cliente no puede distinguir
//! un caso de otro.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Documento que se sirve para `/` o un path vacío
pub const DEFAULT_DOCUMENT: &str = "/index.html";

/// Resultado de resolver un path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Contenido del archivo, leído como texto
    Found(String),
    NotFound,
}

/// Resolver ligado a un content root canónico
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Crea un resolver para `root`
    ///
    /// `root` debe ser ya canónico (ver [`crate::config::ServerConfig`]);
    /// si no lo es, ningún candidato canonicalizado va a quedar dentro.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve el path pedido y lee el archivo si es válido
    pub fn resolve(&self, path: Option<&str>) -> Resolution {
        let Some(file) = self.locate(path) else {
            return Resolution::NotFound;
        };

        match fs::read(&file) {
            Ok(bytes) => Resolution::Found(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                warn!(path = %file.display(), error = %e, "no se pudo leer el archivo");
                Resolution::NotFound
            }
        }
    }

    /// Path canónico del archivo regular a servir, si existe y está dentro del root
    pub fn locate(&self, path: Option<&str>) -> Option<PathBuf> {
        let candidate = self.candidate(path);

        // canonicalize falla si el archivo no existe
        let canonical = match candidate.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                debug!(candidate = %candidate.display(), error = %e, "candidato inexistente");
                return None;
            }
        };

        if !self.contains(&canonical) {
            warn!(
                requested = path.unwrap_or(""),
                resolved = %canonical.display(),
                "path fuera del content root"
            );
            return None;
        }

        if !canonical.is_file() {
            debug!(resolved = %canonical.display(), "no es un archivo regular");
            return None;
        }

        Some(canonical)
    }

    /// Construye el path candidato (sin canonicalizar) para un path de URL
    ///
    /// Se quita una sola `/` inicial y cada segmento se agrega por separado,
    /// saltando los vacíos, así un `//etc/passwd` no reemplaza al root.
    pub fn candidate(&self, path: Option<&str>) -> PathBuf {
        let path = normalize_request_path(path);
        let relative = path.strip_prefix('/').unwrap_or(path);

        let mut candidate = self.root.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            candidate.push(segment);
        }
        candidate
    }

    /// `true` si `canonical` es el root o un descendiente, por componentes
    pub fn contains(&self, canonical: &Path) -> bool {
        canonical.starts_with(&self.root)
    }
}

/// Sustituye el documento por defecto para `None`, `""` y `"/"`
///
/// # Ejemplo
/// ```
/// use static_server::resolver::normalize_request_path;
///
/// assert_eq!(normalize_request_path(None), "/index.html");
/// assert_eq!(normalize_request_path(Some("/")), "/index.html");
/// assert_eq!(normalize_request_path(Some("/a.css")), "/a.css");
/// ```
pub fn normalize_request_path(path: Option<&str>) -> &str {
    match path {
        None | Some("") | Some("/") => DEFAULT_DOCUMENT,
        Some(path) => path,
    }
}
