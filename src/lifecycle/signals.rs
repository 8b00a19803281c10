//! OS signal handling.

use crate::lifecycle::shutdown::Shutdown;

/// Trigger the shutdown coordinator on Ctrl+C.
///
/// Spawned once at startup; the task ends after the first signal.
pub fn spawn_ctrl_c_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                shutdown.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
        }
    });
}
