//! Cross-exchange funding-rate spread monitor.
//!
//! The `arbitrage` module is the pure analysis core; `client` and
//! `monitor` wire it to a polled funding-matrix API.

pub mod arbitrage;
pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod matrix;
pub mod models;
pub mod monitor;
pub mod utils;
