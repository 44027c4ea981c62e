use std::future::Future;

use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{config::Config, error::StartupError};

/// Bind the TCP listener described by `config`
///
/// A port that is already in use fails startup; binding is never retried.
pub async fn bind(config: &Config) -> Result<TcpListener, StartupError> {
    let addr = config.socket_addr();
    TcpListener::bind(&addr).await.map_err(|source| {
        error!("Failed to bind API server to {}: {}", addr, source);
        StartupError::Bind { addr, source }
    })
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
