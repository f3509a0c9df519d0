//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Cada conexión aceptada se procesa de punta a punta en su propio thread:
//!
//! ```text
//! leer path → resolver archivo → construir respuesta → write → cerrar
//! ```
//!
//! El socket se cierra al soltar el `TcpStream`, una sola vez, sin importar
//! por dónde termine el handler.

use crate::config::ServerConfig;
use crate::http::request::ReadEnd;
use crate::http::{read_request_path, Response, StatusCode};
use crate::resolver::{normalize_request_path, PathResolver, Resolution};
use chrono::{DateTime, Local};
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Datos efímeros de una conexión: id secuencial y momento de aceptación
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    id: u64,
    accepted_at: DateTime<Local>,
    started: Instant,
}

impl ConnectionContext {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            accepted_at: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn accepted_at(&self) -> DateTime<Local> {
        self.accepted_at
    }

    /// Tiempo transcurrido desde que se aceptó la conexión
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Procesa una conexión TCP completa y la cierra
///
/// Los errores de I/O se devuelven al thread que la maneja; nunca llegan al
/// loop de accept.
pub fn handle_connection(
    mut stream: TcpStream,
    context: ConnectionContext,
    config: &ServerConfig,
    resolver: &PathResolver,
) -> io::Result<Option<StatusCode>> {
    stream.set_read_timeout(config.read_timeout)?;

    let (path, response) = serve_stream(&mut stream, config.max_request_bytes, resolver)?;
    drop(stream);

    let status = response.as_ref().map(Response::status);
    info!(
        id = context.id(),
        accepted_at = %context.accepted_at().to_rfc3339(),
        elapsed_ms = %format!("{:.2}", context.elapsed().as_secs_f64() * 1000.0),
        path = %normalize_request_path(path.as_deref()),
        status = status.map(|s| s.as_u16()).unwrap_or(0),
        "✅ Cliente desconectado"
    );

    Ok(status)
}

/// Lee el request, resuelve el archivo y escribe la respuesta en `stream`
///
/// Retorna el path recibido (si hubo) y la respuesta enviada. Si el peer
/// cerró (o reseteó) sin mandar ni un byte, no se escribe nada y la
/// respuesta es `None`. Un timeout sin datos sí se responde, con el path
/// ausente.
pub fn serve_stream<S: Read + Write>(
    stream: &mut S,
    max_request_bytes: usize,
    resolver: &PathResolver,
) -> io::Result<(Option<String>, Option<Response>)> {
    let head = read_request_path(stream, max_request_bytes);
    debug!(bytes = head.bytes_read, end = ?head.end, path = ?head.path, "request leído");

    if head.bytes_read == 0 && peer_gone(head.end) {
        debug!(end = ?head.end, "conexión cerrada antes de recibir datos");
        return Ok((None, None));
    }

    let response = match resolver.resolve(head.path.as_deref()) {
        Resolution::Found(content) => Response::ok(content),
        Resolution::NotFound => Response::not_found(),
    };

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    Ok((head.path, Some(response)))
}

/// `true` si la lectura terminó porque el peer ya no está
fn peer_gone(end: ReadEnd) -> bool {
    matches!(
        end,
        ReadEnd::PeerClosed
            | ReadEnd::Failed(io::ErrorKind::ConnectionReset)
            | ReadEnd::Failed(io::ErrorKind::ConnectionAborted)
    )
}
