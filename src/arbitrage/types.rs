use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points per unit of fractional rate.
pub const BPS_PER_UNIT: f64 = 10_000.0;

/// Same-sign spread at or above which an opportunity is `extreme`.
pub const EXTREME_SPREAD_BPS: f64 = 50.0;

/// Spread at or above which an opportunity is flagged as high, and at which
/// same-sign sets get extreme long/short tags.
pub const VERY_HIGH_SPREAD_BPS: f64 = 25.0;

/// Spread classification thresholds, all in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadThresholds {
    pub excellent: f64,
    pub good: f64,
    pub decent: f64,
    pub high_band: f64,
    pub medium_band: f64,
    /// Smallest spread reported as an opportunity at all.
    pub min_spread_bps: f64,
}

impl Default for SpreadThresholds {
    fn default() -> Self {
        Self {
            excellent: 15.0,
            good: 8.0,
            decent: 4.0,
            high_band: 10.0,
            medium_band: 5.0,
            min_spread_bps: 2.0,
        }
    }
}

impl SpreadThresholds {
    /// Check every threshold is finite and non-negative and the opportunity
    /// tiers are in descending order.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("excellent", self.excellent),
            ("good", self.good),
            ("decent", self.decent),
            ("high_band", self.high_band),
            ("medium_band", self.medium_band),
            ("min_spread_bps", self.min_spread_bps),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if !(self.excellent >= self.good && self.good >= self.decent) {
            return Err(format!(
                "tiers must descend: excellent {} >= good {} >= decent {}",
                self.excellent, self.good, self.decent
            ));
        }
        Ok(())
    }
}

/// Best long/short pairing for one instrument.
///
/// `long_exchange` is always the lower-rate side and
/// `spread_bps == (short_rate - long_rate) * 10_000 >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbOpportunity {
    pub long_exchange: String,
    pub short_exchange: String,
    pub long_rate: f64,
    pub short_rate: f64,
    pub spread_bps: f64,
    pub combined_open_interest: f64,
}

impl ArbOpportunity {
    /// Both legs non-negative or both non-positive. Zero counts as either sign.
    pub fn is_same_sign(&self) -> bool {
        same_sign(self.long_rate, self.short_rate)
    }
}

pub(crate) fn same_sign(a: f64, b: f64) -> bool {
    (a >= 0.0 && b >= 0.0) || (a <= 0.0 && b <= 0.0)
}

/// Severity of an opportunity, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Extreme,
    HighSameSign,
    High,
    Excellent,
    Good,
    Decent,
    Minimal,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Extreme => "extreme",
            Tier::HighSameSign => "high-same-sign",
            Tier::High => "high",
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Decent => "decent",
            Tier::Minimal => "minimal",
        }
    }

    /// Label prefix for the flagged tiers.
    pub fn icon(self) -> Option<&'static str> {
        match self {
            Tier::Extreme => Some("🔥"),
            Tier::HighSameSign => Some("🎯"),
            Tier::High => Some("⚡"),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display tag of one exchange within its instrument's quote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    ExtremeShortCandidate,
    ExtremeLongCandidate,
    ShortCandidate,
    LongCandidate,
    ShortOpportunity,
    LongOpportunity,
    Positive,
    Negative,
    Neutral,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::ExtremeShortCandidate => "extreme-short-candidate",
            Role::ExtremeLongCandidate => "extreme-long-candidate",
            Role::ShortCandidate => "short-candidate",
            Role::LongCandidate => "long-candidate",
            Role::ShortOpportunity => "short-opportunity",
            Role::LongOpportunity => "long-opportunity",
            Role::Positive => "positive",
            Role::Negative => "negative",
            Role::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse band of an instrument's max spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadBand {
    Extreme,
    VeryHigh,
    High,
    Medium,
    Low,
}

impl SpreadBand {
    pub fn as_str(self) -> &'static str {
        match self {
            SpreadBand::Extreme => "extreme",
            SpreadBand::VeryHigh => "very-high",
            SpreadBand::High => "high",
            SpreadBand::Medium => "medium",
            SpreadBand::Low => "low",
        }
    }
}

impl fmt::Display for SpreadBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
