//! Evaluation loop turning funding snapshots into opportunity logs.

use crate::config::AppConfig;
use crate::format::{
    format_arb_opportunity, format_number, format_rate, format_spread, format_timestamp,
};
use crate::matrix::{MatrixRow, SortState, build_matrix, exchange_columns};
use crate::models::ApiResponse;
use tokio::sync::watch;
use tracing::info;

/// Spawn the evaluator. Each new snapshot is analyzed once; the task ends
/// when the watcher side of the channel is dropped.
pub fn spawn_spread_evaluator(
    mut rx: watch::Receiver<Option<ApiResponse>>,
    config: AppConfig,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let sort = SortState::default();
        while rx.changed().await.is_ok() {
            let Some(snapshot) = rx.borrow_and_update().clone() else {
                continue;
            };

            let mut rows = build_matrix(&snapshot, &config.thresholds);
            sort.apply(&mut rows);
            let lines = summarize(&rows, &config);
            let updated = format_timestamp(&snapshot.last_updated);

            if lines.is_empty() {
                info!(
                    tokens = rows.len(),
                    min_spread_bps = config.thresholds.min_spread_bps,
                    %updated,
                    "[HEARTBEAT] no opps above threshold"
                );
                continue;
            }
            info!(
                count = lines.len(),
                tokens = rows.len(),
                exchanges = exchange_columns(&rows).len(),
                %updated,
                "[OPP] opportunities found"
            );
            for line in &lines {
                info!("[OPP] {line}");
            }
        }
    })
}

/// One line per row holding an opportunity, in row order, capped at
/// `config.top_n`.
pub fn summarize(rows: &[MatrixRow], config: &AppConfig) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.best.as_ref().map(|opp| (row, opp)))
        .take(config.top_n)
        .map(|(row, opp)| {
            let tier = row.tier.map(|t| t.as_str()).unwrap_or("-");
            let role = |exchange: &str| {
                row.role_of(exchange, &config.thresholds)
                    .map(|r| r.as_str())
                    .unwrap_or("-")
            };
            format!(
                "{:<8} {:<14} spread {:>9} | long {} @ {} ({}) | short {} @ {} ({}) | OI {} | {}",
                row.token,
                format_arb_opportunity(Some(opp), &config.thresholds),
                format_spread(opp.spread_bps, config.spread_unit),
                opp.long_exchange,
                format_rate(opp.long_rate, config.display_mode),
                role(&opp.long_exchange),
                opp.short_exchange,
                format_rate(opp.short_rate, config.display_mode),
                role(&opp.short_exchange),
                format_number(opp.combined_open_interest),
                tier,
            )
        })
        .collect()
}
