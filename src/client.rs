//! HTTP client for the funding-matrix endpoint.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::ApiResponse;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use url::Url;

/// Handle for fetching the funding matrix from one backend.
#[derive(Debug, Clone)]
pub struct FundingClient {
    http: Client,
    url: Url,
}

impl FundingClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.endpoint_url()?, config.request_timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and validate the current funding matrix.
    pub async fn fetch_funding_rates(&self) -> Result<ApiResponse> {
        debug!(url = %self.url, "[FETCH] requesting funding matrix");
        let resp = self.http.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }
        let body = resp.text().await?;
        let parsed = parse_response(&body)?;
        info!(
            tokens = parsed.tokens.len(),
            last_updated = %parsed.last_updated,
            "[FETCH] funding matrix received"
        );
        Ok(parsed)
    }
}

/// Decode a funding-matrix body, rejecting payloads the analyzer cannot use.
pub fn parse_response(body: &str) -> Result<ApiResponse> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.get("tokens").is_some_and(serde_json::Value::is_array) {
        return Err(AppError::InvalidResponse(
            "missing or invalid tokens array".into(),
        ));
    }
    let response: ApiResponse = serde_json::from_value(value)?;

    for row in &response.tokens {
        for (exchange, data) in &row.exchanges {
            if !data.funding_rate.is_finite() {
                return Err(AppError::InvalidResponse(format!(
                    "{}/{exchange}: funding_rate is not finite",
                    row.token
                )));
            }
            if !data.open_interest.is_finite() || data.open_interest < 0.0 {
                return Err(AppError::InvalidResponse(format!(
                    "{}/{exchange}: open_interest must be non-negative, got {}",
                    row.token, data.open_interest
                )));
            }
        }
    }
    Ok(response)
}

/// Short, user-facing description of a fetch failure.
pub fn describe_error(err: &AppError) -> String {
    match err {
        AppError::Status { status: 404, .. } => {
            "API endpoint not found. Please check your configuration.".to_string()
        }
        AppError::Status { status: 500, .. } => "Server error. Please try again later.".to_string(),
        AppError::Http(e) if e.is_timeout() => {
            "Request timeout. Please check your connection.".to_string()
        }
        other => other.to_string(),
    }
}

/// Spawn a task that refetches every `interval` and publishes each good
/// snapshot. A failed fetch is logged and the previous snapshot stays
/// current. The task ends once every receiver is dropped.
pub fn spawn_funding_watcher(
    client: FundingClient,
    interval: Duration,
    tx: watch::Sender<Option<ApiResponse>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                debug!("[FETCH] no receivers left, stopping watcher");
                break;
            }
            match client.fetch_funding_rates().await {
                Ok(snapshot) => {
                    if tx.send(Some(snapshot)).is_err() {
                        debug!("[FETCH] no receivers left, stopping watcher");
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, url = %client.url(), "[FETCH] {}", describe_error(&e));
                }
            }
        }
    })
}
