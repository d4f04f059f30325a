use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vitalsink::api::RestApi;
use vitalsink::config::{load_config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use vitalsink::storage::FileStore;
use vitalsink::{AppError, Monitor};

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Ctrl+C received, starting graceful shutdown"),
        () = terminate => info!("SIGTERM received, starting graceful shutdown"),
    }
}

async fn run() -> Result<(), AppError> {
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;
    let addr = config.api.socket_addr()?;

    info!(config = %config_path.display(), "starting vitalsink");

    let store = Arc::new(FileStore::open(&config.storage.path)?);
    info!(path = %store.path().display(), "record store ready");
    let monitor = Arc::new(Monitor::new(store));
    let api = RestApi::new(monitor).with_body_limit(config.api.max_body_bytes);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let (bound, server) = warp::serve(api.routes())
        .try_bind_with_graceful_shutdown(addr, async move {
            shutdown_rx.await.ok();
            info!("shutting down server");
        })
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!(%bound, "listening");
    let server_handle = tokio::spawn(server);

    shutdown_signal().await;
    shutdown_tx.send(()).ok();

    server_handle
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("server shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "vitalsink stopped");
            ExitCode::FAILURE
        }
    }
}
