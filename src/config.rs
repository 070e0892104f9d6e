//! Configuration loader and application settings.

use crate::arbitrage::SpreadThresholds;
use crate::errors::{AppError, Result};
use crate::models::{DisplayMode, SpreadUnit};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOP_N: usize = 10;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the funding backend, e.g. `http://localhost:8080`.
    pub api_base_url: String,
    /// Endpoint path appended verbatim to the base URL.
    pub api_endpoint: String,
    /// Interval between two funding-matrix fetches.
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub thresholds: SpreadThresholds,
    pub display_mode: DisplayMode,
    pub spread_unit: SpreadUnit,
    /// Max opportunities logged per refresh.
    pub top_n: usize,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, failing on the first missing
    /// required variable or malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = required(&lookup, "FUNDING_API_URL")?;
        let api_endpoint = required(&lookup, "FUNDING_API_ENDPOINT")?;

        let refresh_raw = required(&lookup, "REFRESH_INTERVAL_MS")?;
        let refresh_ms: u64 = parse_value("REFRESH_INTERVAL_MS", &refresh_raw)?;
        if refresh_ms == 0 {
            return Err(AppError::Config(
                "REFRESH_INTERVAL_MS must be greater than zero".into(),
            ));
        }

        let timeout_secs: u64 =
            optional(&lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        let mut thresholds = SpreadThresholds::default();
        if let Some(min_spread) = optional::<f64, _>(&lookup, "MIN_SPREAD_BPS")? {
            thresholds.min_spread_bps = min_spread;
        }
        thresholds.validate().map_err(AppError::Config)?;

        let config = Self {
            api_base_url,
            api_endpoint,
            refresh_interval: Duration::from_millis(refresh_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            thresholds,
            display_mode: optional(&lookup, "DISPLAY_MODE")?.unwrap_or_default(),
            spread_unit: optional(&lookup, "SPREAD_UNIT")?.unwrap_or_default(),
            top_n: optional(&lookup, "TOP_N")?.unwrap_or(DEFAULT_TOP_N),
        };
        // Surface a bad URL at startup rather than on the first fetch.
        config.endpoint_url()?;
        Ok(config)
    }

    /// Full funding-matrix URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.api_base_url, self.api_endpoint))?)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Config(format!(
            "{key} environment variable is required"
        ))),
    }
}

fn optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => parse_value(key, &v).map(Some),
        _ => Ok(None),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} has invalid value '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("FUNDING_API_URL", "http://localhost:8080"),
        ("FUNDING_API_ENDPOINT", "/api/funding-matrix"),
        ("REFRESH_INTERVAL_MS", "30000"),
    ];

    #[test]
    fn loads_required_fields_with_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(BASE)).expect("config should load");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.thresholds, SpreadThresholds::default());
        assert_eq!(cfg.display_mode, DisplayMode::Rate);
        assert_eq!(cfg.spread_unit, SpreadUnit::Bps);
        assert_eq!(cfg.top_n, 10);
        assert_eq!(
            cfg.endpoint_url().unwrap().as_str(),
            "http://localhost:8080/api/funding-matrix"
        );
    }

    #[test]
    fn optional_overrides_apply() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("MIN_SPREAD_BPS", "3.5"),
            ("DISPLAY_MODE", "annualized"),
            ("SPREAD_UNIT", "percentage"),
            ("TOP_N", "3"),
            ("REQUEST_TIMEOUT_SECS", "2"),
        ]);
        let cfg = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(cfg.thresholds.min_spread_bps, 3.5);
        assert_eq!(cfg.display_mode, DisplayMode::Annualized);
        assert_eq!(cfg.spread_unit, SpreadUnit::Percentage);
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn missing_required_variable_fails_fast() {
        for missing in ["FUNDING_API_URL", "FUNDING_API_ENDPOINT", "REFRESH_INTERVAL_MS"] {
            let pairs: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != missing).collect();
            let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(err.to_string().contains(missing), "{err}");
        }
    }

    #[test]
    fn rejects_malformed_values() {
        let cases = [
            ("REFRESH_INTERVAL_MS", "soon"),
            ("REFRESH_INTERVAL_MS", "0"),
            ("MIN_SPREAD_BPS", "-1"),
            ("DISPLAY_MODE", "apr"),
            ("FUNDING_API_URL", "not a url"),
        ];
        for (key, value) in cases {
            let pairs: Vec<_> = BASE
                .iter()
                .copied()
                .filter(|(k, _)| *k != key)
                .chain([(key, value)])
                .collect();
            assert!(
                AppConfig::from_lookup(lookup_from(&pairs)).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }
}
