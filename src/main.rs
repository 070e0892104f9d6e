use anyhow::Result;
use funding_spread_monitor::{
    client::{self, FundingClient},
    config::AppConfig,
    models::ApiResponse,
    monitor, utils,
};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::from_env()?;
    let client = FundingClient::from_config(&config)?;

    tracing::info!(
        url = %client.url(),
        refresh_ms = config.refresh_interval.as_millis() as u64,
        min_spread_bps = config.thresholds.min_spread_bps,
        display_mode = ?config.display_mode,
        "[INIT] funding-spread-monitor starting"
    );

    let (snapshot_tx, snapshot_rx) = watch::channel::<Option<ApiResponse>>(None);

    let watcher = client::spawn_funding_watcher(client, config.refresh_interval, snapshot_tx);
    let evaluator = monitor::spawn_spread_evaluator(snapshot_rx, config);

    tokio::select! {
        _ = futures::future::join(watcher, evaluator) => {
            tracing::info!("[SHUTDOWN] tasks finished");
        }
        _ = utils::shutdown_signal() => {
            tracing::info!("[SHUTDOWN] Ctrl+C received, shutting down");
        }
    }
    Ok(())
}
