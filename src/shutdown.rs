//! Signal handling
//!
//! A run is cancelled on SIGTERM or SIGINT. Dropping the run future drops the
//! in-flight `kubectl` child, which is killed on drop.

use tracing::{error, info};

/// Wait for SIGTERM or SIGINT signal
///
/// Returns the signal name that was received. If the handlers cannot be
/// registered this never resolves, so the run continues unguarded.
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to register signal handlers");
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM");
            "SIGTERM"
        }
        _ = sigint.recv() => {
            info!("Received SIGINT");
            "SIGINT"
        }
    }
}

/// Wait for Ctrl+C signal (Windows)
#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to wait for Ctrl+C");
        return std::future::pending().await;
    }
    info!("Received Ctrl+C");
    "CTRL_C"
}

