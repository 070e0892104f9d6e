pub mod classify;
pub mod evaluator;
pub mod types;

pub use classify::{classify, per_exchange_role, spread_band};
pub use evaluator::{compute_max_spread, find_best_opportunity, sum_open_interest};
pub use types::{ArbOpportunity, Role, SpreadBand, SpreadThresholds, Tier};
