//! Severity tiers and display tags derived from spreads.
//!
//! Precedence everywhere is: same-sign extreme checks first, then the
//! configurable bands, then plain sign.

use super::evaluator::rate_range;
use super::types::{
    ArbOpportunity, BPS_PER_UNIT, EXTREME_SPREAD_BPS, Role, SpreadBand, SpreadThresholds, Tier,
    VERY_HIGH_SPREAD_BPS, same_sign,
};
use crate::models::QuoteSet;

/// Slack allowed when comparing a spread against a tier or band threshold.
/// Rates such as 0.009 - 0.004 land one ulp short of the decimal result once
/// scaled to bps.
const SPREAD_EPSILON_BPS: f64 = 1e-9;

/// `spread_bps >= threshold_bps`, tolerant of representation error.
fn meets(spread_bps: f64, threshold_bps: f64) -> bool {
    spread_bps >= threshold_bps - SPREAD_EPSILON_BPS
}

/// Tier of an opportunity under `thresholds`.
pub fn classify(opportunity: &ArbOpportunity, thresholds: &SpreadThresholds) -> Tier {
    let spread = opportunity.spread_bps;
    let same_sign = opportunity.is_same_sign();

    if same_sign && meets(spread, EXTREME_SPREAD_BPS) {
        Tier::Extreme
    } else if same_sign && meets(spread, VERY_HIGH_SPREAD_BPS) {
        Tier::HighSameSign
    } else if meets(spread, VERY_HIGH_SPREAD_BPS) {
        Tier::High
    } else if meets(spread, thresholds.excellent) {
        Tier::Excellent
    } else if meets(spread, thresholds.good) {
        Tier::Good
    } else if meets(spread, thresholds.decent) {
        Tier::Decent
    } else {
        Tier::Minimal
    }
}

/// Tag for the exchange quoting `rate` within `quotes`.
///
/// Only the exchanges holding the max or min rate get leg tags; everyone
/// else falls through to a sign tag. A set whose spread is below
/// `min_spread_bps` is neutral throughout.
pub fn per_exchange_role(rate: f64, quotes: &QuoteSet, thresholds: &SpreadThresholds) -> Role {
    let Some((max, min)) = rate_range(quotes) else {
        return Role::Neutral;
    };
    let spread = (max - min) * BPS_PER_UNIT;
    let is_max = rate == max;
    let is_min = rate == min;

    if same_sign(max, min) && meets(spread, VERY_HIGH_SPREAD_BPS) {
        if is_max {
            return Role::ExtremeShortCandidate;
        }
        if is_min {
            return Role::ExtremeLongCandidate;
        }
    }

    if !meets(spread, thresholds.min_spread_bps) {
        return Role::Neutral;
    }

    if meets(spread, thresholds.medium_band) {
        if is_max {
            return Role::ShortCandidate;
        }
        if is_min {
            return Role::LongCandidate;
        }
    }

    if is_max {
        return Role::ShortOpportunity;
    }
    if is_min {
        return Role::LongOpportunity;
    }

    if rate > 0.0 {
        Role::Positive
    } else if rate < 0.0 {
        Role::Negative
    } else {
        Role::Neutral
    }
}

/// Band of an instrument's max spread; `None` when there is no spread.
pub fn spread_band(spread_bps: Option<f64>, thresholds: &SpreadThresholds) -> Option<SpreadBand> {
    let spread = spread_bps?;
    let band = if meets(spread, EXTREME_SPREAD_BPS) {
        SpreadBand::Extreme
    } else if meets(spread, VERY_HIGH_SPREAD_BPS) {
        SpreadBand::VeryHigh
    } else if meets(spread, thresholds.high_band) {
        SpreadBand::High
    } else if meets(spread, thresholds.medium_band) {
        SpreadBand::Medium
    } else {
        SpreadBand::Low
    };
    Some(band)
}
