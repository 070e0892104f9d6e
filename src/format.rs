//! Display formatting for rates, spreads and opportunities.

use crate::arbitrage::{ArbOpportunity, SpreadThresholds, classify};
use crate::models::{DisplayMode, SpreadUnit};
use chrono::{DateTime, Local};

/// Most venues settle funding every 8 hours.
pub const FUNDING_PERIODS_PER_DAY: f64 = 3.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Placeholder shown when an instrument has no opportunity.
pub const NO_OPPORTUNITY: &str = "–";

/// Compact notional: `1.23B`, `4.50M`, `7.00K`, or a whole number.
pub fn format_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

pub fn format_rate(rate: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Rate => format!("{:.3}%", rate * 100.0),
        DisplayMode::Annualized => {
            let annualized = rate * FUNDING_PERIODS_PER_DAY * DAYS_PER_YEAR * 100.0;
            format!("{annualized:.2}%")
        }
    }
}

pub fn format_spread(spread_bps: f64, unit: SpreadUnit) -> String {
    match unit {
        SpreadUnit::Bps => format!("{spread_bps:.0} bps"),
        SpreadUnit::Percentage => format!("{:.3}%", spread_bps / 100.0),
    }
}

fn short_name(exchange: &str) -> String {
    exchange.chars().take(3).collect::<String>().to_uppercase()
}

/// `L:XXX S:YYY` label, prefixed with the tier icon for flagged tiers.
pub fn format_arb_opportunity(
    opportunity: Option<&ArbOpportunity>,
    thresholds: &SpreadThresholds,
) -> String {
    let Some(opp) = opportunity else {
        return NO_OPPORTUNITY.to_string();
    };
    let legs = format!(
        "L:{} S:{}",
        short_name(&opp.long_exchange),
        short_name(&opp.short_exchange)
    );
    match classify(opp, thresholds).icon() {
        Some(icon) => format!("{icon} {legs}"),
        None => legs,
    }
}

/// RFC 3339 timestamp rendered in local time; other input is returned as is.
pub fn format_timestamp(ts: &str) -> String {
    match DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => ts.to_string(),
    }
}
