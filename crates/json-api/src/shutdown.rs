//! Graceful shutdown on Ctrl+C or SIGTERM.

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install the Ctrl+C handler: {0}")]
    CtrlC(#[source] std::io::Error),

    #[cfg(unix)]
    #[error("failed to install the SIGTERM handler: {0}")]
    Sigterm(#[source] std::io::Error),
}

pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let ctrl_c = async {
        signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::Sigterm)?
            .recv()
            .await;

        Ok(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => result?,
        result = terminate => result?,
    }

    info!("shutdown signal received, stopping the server");
    handle.stop_graceful(None);

    Ok(())
}
