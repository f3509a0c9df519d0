//! # Lectura del Request
//! src/http/request.rs
//!
//! El servidor no parsea HTTP de verdad: lee bytes hasta que el texto
//! acumulado tiene al menos dos tokens separados por whitespace y toma el
//! segundo como path.
//!
//! ```text
//! GET /about.html HTTP/1.1\r\n
//!     ^^^^^^^^^^^
//!     path
//! ```
//!
//! El método, la versión y los headers se ignoran. Lo que llegue después
//! del path en la misma lectura se descarta y no se hacen más lecturas.

use std::io::{ErrorKind, Read};

/// Tamaño de cada lectura del socket
pub const READ_BUFFER_SIZE: usize = 1024;

/// Por qué terminó el loop de lectura
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEnd {
    /// Se encontró el segundo token
    PathFound,
    /// El peer cerró la conexión (lectura de 0 bytes)
    PeerClosed,
    /// Se alcanzó el máximo de bytes sin encontrar path
    LimitReached,
    /// La lectura falló (reset, timeout, ...)
    Failed(ErrorKind),
}

/// Resultado de leer el inicio de un request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// Path solicitado; `None` si nunca apareció un segundo token
    pub path: Option<String>,
    /// Total de bytes recibidos
    pub bytes_read: usize,
    pub end: ReadEnd,
}

/// Extrae el path (segundo token) del texto recibido
///
/// # Ejemplo
/// ```
/// use static_server::http::request::extract_path;
///
/// assert_eq!(extract_path("GET /index.html HTTP/1.1"), Some("/index.html"));
/// assert_eq!(extract_path("GET"), None);
/// ```
pub fn extract_path(text: &str) -> Option<&str> {
    text.split_whitespace().nth(1)
}

/// Lee del stream en bloques de [`READ_BUFFER_SIZE`] hasta encontrar el path
///
/// Los bytes se acumulan en un buffer que crece hasta `max_bytes`. Cualquier
/// condición que corte la lectura antes de ver dos tokens deja el path en
/// `None`; nunca es un error para el llamador.
pub fn read_request_path<R: Read>(reader: &mut R, max_bytes: usize) -> RequestHead {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let mut accumulated: Vec<u8> = Vec::with_capacity(READ_BUFFER_SIZE);

    let end = loop {
        let room = max_bytes.saturating_sub(accumulated.len()).min(READ_BUFFER_SIZE);
        if room == 0 {
            break ReadEnd::LimitReached;
        }

        match reader.read(&mut buffer[..room]) {
            Ok(0) => break ReadEnd::PeerClosed,
            Ok(n) => {
                accumulated.extend_from_slice(&buffer[..n]);

                // Se decodifica todo lo acumulado, no solo la última lectura
                let text = String::from_utf8_lossy(&accumulated);
                if let Some(path) = extract_path(&text) {
                    return RequestHead {
                        path: Some(path.to_string()),
                        bytes_read: accumulated.len(),
                        end: ReadEnd::PathFound,
                    };
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => break ReadEnd::Failed(e.kind()),
        }
    };

    RequestHead {
        path: None,
        bytes_read: accumulated.len(),
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Reader que entrega cada chunk en una lectura separada
    struct ChunkedReader {
        chunks: VecDeque<io::Result<Vec<u8>>>,
        reads: usize,
    }

    impl ChunkedReader {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                chunks: chunks.into(),
                reads: 0,
            }
        }
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            match self.chunks.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    Ok(n)
                }
            }
        }
    }

    #[test]
    fn test_extract_path_simple() {
        assert_eq!(extract_path("GET /a.html HTTP/1.1\r\n"), Some("/a.html"));
    }

    #[test]
    fn test_extract_path_ignores_method() {
        assert_eq!(extract_path("WHATEVER /x"), Some("/x"));
    }

    #[test]
    fn test_extract_path_any_whitespace() {
        assert_eq!(extract_path("GET\t/tabs.html\r\n"), Some("/tabs.html"));
    }

    #[test]
    fn test_extract_path_single_token() {
        assert_eq!(extract_path("GET\r\n"), None);
        assert_eq!(extract_path(""), None);
    }

    #[test]
    fn test_read_full_request_line() {
        let mut reader = Cursor::new(b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path.as_deref(), Some("/index.html"));
        assert_eq!(head.end, ReadEnd::PathFound);
    }

    #[test]
    fn test_read_path_split_across_reads() {
        let mut reader = ChunkedReader::new(vec![Ok(b"GET".to_vec()), Ok(b" /late.html HTTP/1.1".to_vec())]);
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path.as_deref(), Some("/late.html"));
        assert_eq!(reader.reads, 2);
    }

    #[test]
    fn test_stops_reading_once_path_found() {
        let mut reader = ChunkedReader::new(vec![
            Ok(b"GET /first HTTP/1.1\r\n".to_vec()),
            Ok(b"more bytes that must not be read".to_vec()),
        ]);
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path.as_deref(), Some("/first"));
        assert_eq!(reader.reads, 1);
        assert_eq!(reader.chunks.len(), 1);
    }

    #[test]
    fn test_peer_closed_without_data() {
        let mut reader = Cursor::new(Vec::new());
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path, None);
        assert_eq!(head.bytes_read, 0);
        assert_eq!(head.end, ReadEnd::PeerClosed);
    }

    #[test]
    fn test_malformed_line_then_close() {
        let mut reader = Cursor::new(b"GET\r\n".to_vec());
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path, None);
        assert_eq!(head.bytes_read, 5);
        assert_eq!(head.end, ReadEnd::PeerClosed);
    }

    #[test]
    fn test_limit_reached_without_path() {
        let mut reader = Cursor::new(vec![b'A'; 5000]);
        let head = read_request_path(&mut reader, 2048);

        assert_eq!(head.path, None);
        assert_eq!(head.bytes_read, 2048);
        assert_eq!(head.end, ReadEnd::LimitReached);
    }

    #[test]
    fn test_read_error_ends_loop() {
        let mut reader = ChunkedReader::new(vec![
            Ok(b"GET".to_vec()),
            Err(io::Error::new(ErrorKind::ConnectionReset, "reset")),
        ]);
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path, None);
        assert_eq!(head.bytes_read, 3);
        assert_eq!(head.end, ReadEnd::Failed(ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut reader = ChunkedReader::new(vec![
            Err(io::Error::new(ErrorKind::Interrupted, "signal")),
            Ok(b"GET /ok HTTP/1.1".to_vec()),
        ]);
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path.as_deref(), Some("/ok"));
    }

    #[test]
    fn test_path_taken_as_soon_as_second_token_appears() {
        let mut reader = ChunkedReader::new(vec![Ok(b"GET /ind".to_vec()), Ok(b"ex.html HTTP/1.1".to_vec())]);
        let head = read_request_path(&mut reader, 8192);

        assert_eq!(head.path.as_deref(), Some("/ind"));
        assert_eq!(reader.reads, 1);
    }
}
