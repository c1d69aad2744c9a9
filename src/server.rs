//! Process bootstrap: storage selection, schema setup, and serving.

use std::sync::Arc;

use diesel::r2d2::PoolError;
use thiserror::Error;
use tokio::{net::TcpListener, signal};

use crate::{
    config::{AppConfig, StorageMode},
    http::{AppState, router},
    task::{
        adapters::{
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, TaskPgPool, apply_schema, build_pool},
        },
        ports::TaskRepository,
    },
};

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The connection pool could not be built or a connection checked out.
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),

    /// The task schema could not be applied.
    #[error("failed to apply task schema: {0}")]
    Schema(#[from] diesel::result::Error),

    /// A blocking setup task panicked or was cancelled.
    #[error("database setup task failed: {0}")]
    Setup(#[from] tokio::task::JoinError),

    /// The listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Requested bind address.
        address: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Builds the repository selected by `config.storage_mode`.
///
/// For `PostgreSQL` this connects the pool and applies the schema.
///
/// # Errors
///
/// Returns [`ServerError`] when the database is unreachable or the schema
/// cannot be applied.
pub async fn build_repository(config: &AppConfig) -> Result<Arc<dyn TaskRepository>, ServerError> {
    match config.storage_mode {
        StorageMode::InMemory => {
            tracing::warn!("using in-memory storage; tasks are lost on restart");
            Ok(Arc::new(InMemoryTaskRepository::new()))
        }
        StorageMode::Postgres => {
            let pool = connect_postgres(config).await?;
            Ok(Arc::new(PostgresTaskRepository::new(pool)))
        }
    }
}

async fn connect_postgres(config: &AppConfig) -> Result<TaskPgPool, ServerError> {
    let url = config.database_url.clone();
    let settings = config.pool_settings();
    tokio::task::spawn_blocking(move || -> Result<TaskPgPool, ServerError> {
        let pool = build_pool(&url, &settings)?;
        let mut connection = pool.get()?;
        apply_schema(&mut connection)?;
        tracing::info!(max_size = settings.max_size, "database pool ready");
        Ok(pool)
    })
    .await?
}

/// Serves the API until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServerError`] when storage setup, binding, or serving fails.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    tracing::info!(storage_mode = %config.storage_mode, "starting task API");
    let repository = build_repository(&config).await?;
    let application = router(AppState::new(repository));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    match listener.local_addr() {
        Ok(local) => tracing::info!("listening on {local}"),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Completes on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
