//! # Construcción de Respuestas
//! src/http/response.rs
//!
//! Las respuestas de este servidor no llevan headers. El formato en el cable es:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! \r\n
//! <contenido del archivo>\r\n
//! \r\n
//! ```
//!
//! Un 404, o un 200 con contenido vacío, es solo la status line seguida de
//! la línea vacía:
//!
//! ```text
//! HTTP/1.1 404 Not Found\r\n
//! \r\n
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{Response, StatusCode};
//!
//! let response = Response::ok("Hello");
//! assert_eq!(response.status(), StatusCode::Ok);
//! assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\nHello\r\n\r\n");
//! ```

use super::StatusCode;

/// Versión que se anuncia en la status line
const HTTP_VERSION: &str = "HTTP/1.1";

/// Terminador de línea HTTP
const CRLF: &str = "\r\n";

/// Una respuesta completa: status y body opcional (texto UTF-8)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    /// Crea una respuesta con el status dado y sin body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// Establece el body de la respuesta
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// 200 OK con el contenido del archivo
    pub fn ok(content: impl Into<String>) -> Self {
        Self::new(StatusCode::Ok).with_body(content)
    }

    /// 404 Not Found, siempre sin body
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// Convierte la respuesta a texto listo para escribir en el socket
    ///
    /// El body solo se emite si el status es de éxito y no está vacío;
    /// un body asignado a un 404 se ignora.
    pub fn to_wire_string(&self) -> String {
        let mut result = format!("{} {}{}{}", HTTP_VERSION, self.status, CRLF, CRLF);

        if self.status.is_success() && !self.body.is_empty() {
            result.push_str(&self.body);
            result.push_str(CRLF);
            result.push_str(CRLF);
        }

        result
    }

    /// Bytes UTF-8 de la respuesta, para un único `write_all`
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_wire_string().into_bytes()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
