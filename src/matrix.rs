//! Funding matrix: one analyzed row per instrument, sortable by column.

use crate::arbitrage::{
    ArbOpportunity, Role, SpreadBand, SpreadThresholds, Tier, classify, compute_max_spread,
    find_best_opportunity, per_exchange_role, spread_band, sum_open_interest,
};
use crate::models::{ApiResponse, QuoteSet, SortDirection, TokenRow};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub token: String,
    pub quotes: QuoteSet,
    pub max_spread_bps: Option<f64>,
    pub band: Option<SpreadBand>,
    pub best: Option<ArbOpportunity>,
    pub tier: Option<Tier>,
    pub total_open_interest: f64,
}

impl MatrixRow {
    pub fn from_token_row(row: &TokenRow, thresholds: &SpreadThresholds) -> Self {
        let quotes = row.quotes();
        let max_spread_bps = compute_max_spread(&quotes);
        let best = find_best_opportunity(&quotes, thresholds.min_spread_bps);
        let tier = best.as_ref().map(|opp| classify(opp, thresholds));
        Self {
            token: row.token.clone(),
            max_spread_bps,
            band: spread_band(max_spread_bps, thresholds),
            best,
            tier,
            total_open_interest: sum_open_interest(&quotes),
            quotes,
        }
    }

    /// Role of `exchange` in this row, `None` when it does not quote the token.
    pub fn role_of(&self, exchange: &str, thresholds: &SpreadThresholds) -> Option<Role> {
        self.quotes
            .get(exchange)
            .map(|q| per_exchange_role(q.funding_rate, &self.quotes, thresholds))
    }

    fn rate_on(&self, exchange: &str) -> Option<f64> {
        self.quotes.get(exchange).map(|q| q.funding_rate)
    }
}

pub fn build_matrix(response: &ApiResponse, thresholds: &SpreadThresholds) -> Vec<MatrixRow> {
    response
        .tokens
        .iter()
        .map(|row| MatrixRow::from_token_row(row, thresholds))
        .collect()
}

/// Sorted union of every exchange quoted anywhere in the matrix.
pub fn exchange_columns(rows: &[MatrixRow]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.quotes.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Token,
    MaxSpread,
    BestSpread,
    OpenInterest,
    /// Funding rate quoted on the named exchange.
    Exchange(String),
}

/// Current column and direction of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::BestSpread,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Select a column: the same column flips direction, a new one starts
    /// descending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn apply(&self, rows: &mut [MatrixRow]) {
        sort_rows(rows, &self.key, self.direction);
    }
}

/// Stable sort by `key`. Rows without a value for the column go last in
/// either direction.
pub fn sort_rows(rows: &mut [MatrixRow], key: &SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| match key {
        SortKey::Token => directed(a.token.cmp(&b.token), direction),
        SortKey::MaxSpread => missing_last(a.max_spread_bps, b.max_spread_bps, direction),
        SortKey::BestSpread => missing_last(
            a.best.as_ref().map(|o| o.spread_bps),
            b.best.as_ref().map(|o| o.spread_bps),
            direction,
        ),
        SortKey::OpenInterest => missing_last(
            Some(a.total_open_interest),
            Some(b.total_open_interest),
            direction,
        ),
        SortKey::Exchange(name) => missing_last(a.rate_on(name), b.rate_on(name), direction),
    });
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn missing_last(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.total_cmp(&y), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
