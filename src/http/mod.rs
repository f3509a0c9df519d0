//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Lo mínimo de HTTP que necesita un servidor de archivos estáticos:
//!
//! - Extraer el path del request line (sin validar método ni versión)
//! - Construir la respuesta (status line + body opcional, sin headers)
//! - Los dos status codes posibles: 200 y 404

pub mod request;   // Lectura del path desde el socket
pub mod response;  // Construcción de la respuesta
pub mod status;    // Códigos de estado

pub use request::{read_request_path, RequestHead};
pub use response::Response;
pub use status::StatusCode;
