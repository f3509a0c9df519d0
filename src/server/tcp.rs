//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop de accept secuencial. Cada conexión recibe el siguiente id y se
//! procesa en su propio thread; el loop nunca espera a que termine un
//! handler.

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::resolver::PathResolver;
use crate::server::connection::{handle_connection, ConnectionContext};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

/// Servidor de archivos estáticos, un thread por conexión
pub struct Server {
    config: Arc<ServerConfig>,
    resolver: Arc<PathResolver>,
    /// Próximo id de conexión; solo lo toca el loop de accept
    next_id: u64,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        let resolver = PathResolver::new(config.content_root.clone());

        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            next_id: 0,
        }
    }

    /// Hace bind en la dirección configurada
    pub fn bind(&self) -> Result<TcpListener> {
        let address = self.config.address();
        TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })
    }

    /// Bind + loop de accept. Solo retorna si falla el bind.
    pub fn run(&mut self) -> Result<()> {
        info!("[*] Iniciando servidor en {}", self.config.address());
        let listener = self.bind()?;
        info!("[+] Servidor escuchando en {}", self.config.address());

        self.serve(listener);
        Ok(())
    }

    /// Acepta conexiones de `listener` indefinidamente
    pub fn serve(&mut self, listener: TcpListener) {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => error!("❌ Error al aceptar conexión: {}", e),
            }
        }
    }

    /// Asigna el siguiente contexto; ids únicos y estrictamente crecientes
    fn next_context(&mut self) -> ConnectionContext {
        let context = ConnectionContext::new(self.next_id);
        self.next_id += 1;
        context
    }

    fn dispatch(&mut self, stream: TcpStream) {
        let context = self.next_context();
        let id = context.id();

        let peer_addr = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        debug!(id, peer = %peer_addr, "Cliente conectado");

        let config = Arc::clone(&self.config);
        let resolver = Arc::clone(&self.resolver);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", id))
            .spawn(move || {
                if let Err(e) = handle_connection(stream, context, &config, &resolver) {
                    error!(id, "❌ Error en conexión: {}", e);
                }
            });

        if let Err(e) = spawned {
            error!(id, "❌ No se pudo crear el thread: {}", e);
        }
    }
}
