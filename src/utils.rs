//! Miscellaneous helper utilities.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset. HTTP internals are noisy at info.
const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Initialize `tracing` subscriber with env-based filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Resolves on Ctrl+C. A failure to install the handler is logged and the
/// future never resolves, leaving the process to be stopped externally.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "[SHUTDOWN] could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
