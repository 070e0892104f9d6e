//! Shared data structures used throughout the application.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Funding snapshot of a single exchange for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeQuote {
    pub exchange_name: String,
    /// Fractional rate per funding period (0.0001 == 1 bps), not a percentage.
    pub funding_rate: f64,
    /// Non-negative notional value.
    pub open_interest: f64,
}

impl ExchangeQuote {
    pub fn new(exchange_name: impl Into<String>, funding_rate: f64, open_interest: f64) -> Self {
        Self {
            exchange_name: exchange_name.into(),
            funding_rate,
            open_interest,
        }
    }
}

/// Quotes for one instrument keyed by exchange name.
///
/// Ordered by name so pair iteration, and therefore tie-breaking, is
/// deterministic across refreshes.
pub type QuoteSet = BTreeMap<String, ExchangeQuote>;

/// Build a `QuoteSet` from `(exchange, funding_rate, open_interest)` triples.
/// A repeated exchange name replaces the earlier entry.
pub fn quote_set<'a, I>(quotes: I) -> QuoteSet
where
    I: IntoIterator<Item = (&'a str, f64, f64)>,
{
    quotes
        .into_iter()
        .map(|(name, rate, oi)| (name.to_string(), ExchangeQuote::new(name, rate, oi)))
        .collect()
}

/// Per-exchange payload of the funding-matrix endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeData {
    pub funding_rate: f64,
    pub open_interest: f64,
    #[serde(default)]
    pub market_symbol: Option<String>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    /// Start of the latest 8h funding bucket.
    #[serde(default)]
    pub funding_ts: Option<String>,
    #[serde(default)]
    pub stats_ts: Option<String>,
}

/// One instrument row of the funding matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    pub token: String,
    pub exchanges: BTreeMap<String, ExchangeData>,
}

impl TokenRow {
    pub fn quotes(&self) -> QuoteSet {
        self.exchanges
            .iter()
            .map(|(name, data)| {
                (
                    name.clone(),
                    ExchangeQuote::new(name.as_str(), data.funding_rate, data.open_interest),
                )
            })
            .collect()
    }
}

/// Body of `GET /api/funding-matrix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub last_updated: String,
    pub tokens: Vec<TokenRow>,
}

/// How funding rates are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Raw per-period (8h) rate.
    #[default]
    Rate,
    Annualized,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rate" => Ok(Self::Rate),
            "annualized" => Ok(Self::Annualized),
            other => Err(format!("unknown display mode '{other}'")),
        }
    }
}

/// Unit used when showing a spread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadUnit {
    #[default]
    Bps,
    Percentage,
}

impl FromStr for SpreadUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bps" => Ok(Self::Bps),
            "percentage" | "pct" => Ok(Self::Percentage),
            other => Err(format!("unknown spread unit '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}
