//! `TombolaServer` builder and server loop.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tombola_store::Backend;

use crate::handler::app;
use crate::{RoomService, ServerConfig, TombolaError};

/// Builder for configuring and starting a Tombola server.
///
/// # Example
///
/// ```rust,no_run
/// use tombola::prelude::*;
///
/// # async fn run() -> Result<(), TombolaError> {
/// let server = TombolaServer::builder()
///     .bind("0.0.0.0:8080")
///     .data_path("data/rooms.json")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TombolaServerBuilder {
    config: ServerConfig,
}

impl TombolaServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind = addr.to_string();
        self
    }

    /// Persists rooms to the JSON file at `path`.
    pub fn data_path(mut self, path: &str) -> Self {
        self.config = self.config.with_data_path(path);
        self
    }

    /// Sets the read policy for rooms that were never saved.
    pub fn materialize_on_read(mut self, enabled: bool) -> Self {
        self.config.materialize_on_read = enabled;
        self
    }

    /// Opens the store and binds the listener.
    ///
    /// Uses the file store when a data path is configured, the memory
    /// store otherwise.
    pub async fn build(self) -> Result<TombolaServer, TombolaError> {
        let ServerConfig {
            bind,
            data_path,
            materialize_on_read,
        } = self.config;

        let backend = Backend::open(data_path).await?;
        let store_kind = backend.kind();
        let service = Arc::new(RoomService::new(backend, materialize_on_read));

        let listener = TcpListener::bind(&bind)
            .await
            .map_err(|source| TombolaError::Bind {
                addr: bind.clone(),
                source,
            })?;

        tracing::debug!(store = store_kind, materialize_on_read, "server built");
        Ok(TombolaServer {
            listener,
            router: app(service),
        })
    }
}

/// A bound Tombola server.
///
/// Call [`run()`](Self::run) to start serving requests.
#[derive(Debug)]
pub struct TombolaServer {
    listener: TcpListener,
    router: Router,
}

impl TombolaServer {
    /// Creates a new builder.
    pub fn builder() -> TombolaServerBuilder {
        TombolaServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The application router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves requests until Ctrl-C.
    pub async fn run(self) -> Result<(), TombolaError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serves requests until `shutdown` completes, then drains in-flight
    /// requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), TombolaError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr().map_err(TombolaError::Serve)?;
        tracing::info!(%addr, "Tombola server running");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(TombolaError::Serve)?;

        tracing::info!("Tombola server stopped");
        Ok(())
    }
}
