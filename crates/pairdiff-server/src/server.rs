use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use pairdiff_store::InMemorySideStore;
use pairdiff_validate::Validator;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::SharedValidator;
use crate::router::build_router;

/// pairdiff HTTP server. Owns the process-wide validator.
pub struct PairdiffServer {
    config: ServerConfig,
    validator: SharedValidator,
}

impl PairdiffServer {
    /// Create a server with an empty in-memory store.
    pub fn new(config: ServerConfig) -> Self {
        let validator = Arc::new(Validator::new(InMemorySideStore::new(), config.transport));
        Self { config, validator }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn validator(&self) -> &SharedValidator {
        &self.validator
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.validator), self.config.max_payload_bytes)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(
            transport = ?self.config.transport,
            "pairdiff server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "could not install Ctrl-C handler; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairdiff_validate::Transport;

    #[test]
    fn server_construction() {
        let server = PairdiffServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(*server.validator().parser(), Transport::Base64);
    }

    #[test]
    fn router_builds() {
        let server = PairdiffServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[test]
    fn plain_transport_from_config() {
        let config = ServerConfig {
            transport: Transport::Plain,
            ..Default::default()
        };
        let server = PairdiffServer::new(config);
        assert_eq!(*server.validator().parser(), Transport::Plain);
    }
}
