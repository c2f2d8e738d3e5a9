use std::sync::Arc;
use std::time::Duration;

use guestbook_log::{Guestbook, Notifier};
use guestbook_store::{BlobStore, FsBlobStore, InMemoryBlobStore};
use tokio::net::TcpListener;

use crate::config::{ServerConfig, StorageConfig};
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;
use crate::webhook::WebhookNotifier;

/// Open the blob backend named by the storage config.
pub async fn open_store(storage: &StorageConfig) -> ServerResult<Arc<dyn BlobStore>> {
    Ok(match storage {
        StorageConfig::Memory => {
            tracing::warn!("using in-memory storage, drawings will not survive a restart");
            Arc::new(InMemoryBlobStore::new())
        }
        StorageConfig::Filesystem { root } => Arc::new(FsBlobStore::open(root).await?),
    })
}

/// Wire a [`Guestbook`] from configuration: storage, delete secret, webhook.
pub async fn open_guestbook(config: &ServerConfig) -> ServerResult<Guestbook> {
    let store = open_store(&config.storage).await?;
    let mut guestbook = Guestbook::new(store);
    if let Some(secret) = &config.delete_secret {
        guestbook = guestbook.with_delete_secret(secret.clone());
    } else {
        tracing::warn!("no delete secret configured, deletion is disabled");
    }
    if let Some(url) = &config.webhook_url {
        let timeout = Duration::from_millis(config.webhook_timeout_ms);
        let notifier: Arc<dyn Notifier> = Arc::new(WebhookNotifier::new(url.clone(), timeout)?);
        guestbook = guestbook.with_notifier(notifier);
    }
    Ok(guestbook)
}

/// Guestbook HTTP server.
pub struct GuestbookServer {
    config: ServerConfig,
    state: AppState,
}

impl GuestbookServer {
    pub fn new(config: ServerConfig, guestbook: Guestbook) -> Self {
        Self {
            config,
            state: AppState::new(guestbook),
        }
    }

    /// Build the guestbook from the config and wrap it in a server.
    pub async fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let guestbook = open_guestbook(&config).await?;
        Ok(Self::new(config, guestbook))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), self.config.max_drawing_bytes)
    }

    /// Start serving requests until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("guestbook server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("guestbook server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
