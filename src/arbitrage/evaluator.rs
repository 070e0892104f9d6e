use super::types::{ArbOpportunity, BPS_PER_UNIT};
use crate::models::{ExchangeQuote, QuoteSet};

/// Highest and lowest funding rate in the set, `None` when it has fewer than
/// two quotes.
pub(crate) fn rate_range(quotes: &QuoteSet) -> Option<(f64, f64)> {
    if quotes.len() < 2 {
        return None;
    }
    let (max, min) = quotes.values().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(max, min), q| (max.max(q.funding_rate), min.min(q.funding_rate)),
    );
    Some((max, min))
}

/// Max pairwise funding spread in basis points, `None` with fewer than two
/// exchanges.
pub fn compute_max_spread(quotes: &QuoteSet) -> Option<f64> {
    rate_range(quotes).map(|(max, min)| (max - min) * BPS_PER_UNIT)
}

/// Best long/short pairing whose spread clears `min_spread_bps`.
///
/// Every unordered pair is checked once. The widest qualifying spread wins;
/// on an exact tie the first pair in iteration order is kept. The minimum is
/// applied exactly, with no rounding slack. The lower-rate side is
/// the long leg, and with equal rates the first exchange of the pair is long.
pub fn find_best_opportunity(quotes: &QuoteSet, min_spread_bps: f64) -> Option<ArbOpportunity> {
    let list: Vec<&ExchangeQuote> = quotes.values().collect();
    if list.len() < 2 {
        return None;
    }

    let mut best: Option<ArbOpportunity> = None;
    for (i, a) in list.iter().enumerate() {
        for b in &list[i + 1..] {
            let spread = (a.funding_rate - b.funding_rate).abs() * BPS_PER_UNIT;
            if spread < min_spread_bps {
                continue;
            }
            if best.as_ref().is_some_and(|current| spread <= current.spread_bps) {
                continue;
            }
            let (long, short) = if a.funding_rate > b.funding_rate {
                (*b, *a)
            } else {
                (*a, *b)
            };
            best = Some(ArbOpportunity {
                long_exchange: long.exchange_name.clone(),
                short_exchange: short.exchange_name.clone(),
                long_rate: long.funding_rate,
                short_rate: short.funding_rate,
                spread_bps: (short.funding_rate - long.funding_rate) * BPS_PER_UNIT,
                combined_open_interest: long.open_interest + short.open_interest,
            });
        }
    }
    best
}

/// Total open interest across every exchange quoting the instrument.
pub fn sum_open_interest(quotes: &QuoteSet) -> f64 {
    quotes.values().map(|q| q.open_interest).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote_set;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn max_spread_needs_two_exchanges() {
        assert_eq!(compute_max_spread(&QuoteSet::new()), None);
        assert_eq!(compute_max_spread(&quote_set([("a", 0.001, 1.0)])), None);
    }

    #[test]
    fn max_spread_uses_extremes_only() {
        let q = quote_set([("a", 0.0010, 1.0), ("b", -0.0005, 1.0), ("c", 0.0002, 1.0)]);
        let spread = compute_max_spread(&q).unwrap();
        assert!(close(spread, 15.0), "spread = {spread}");
    }

    #[test]
    fn best_opportunity_assigns_low_rate_to_long_leg() {
        let q = quote_set([("a", 0.0035, 200.0), ("b", 0.0010, 100.0)]);
        let opp = find_best_opportunity(&q, 2.0).expect("25 bps clears 2 bps");
        assert_eq!(opp.long_exchange, "b");
        assert_eq!(opp.short_exchange, "a");
        assert_eq!(opp.long_rate, 0.0010);
        assert_eq!(opp.short_rate, 0.0035);
        assert!(close(opp.spread_bps, 25.0));
        assert_eq!(opp.combined_open_interest, 300.0);
    }

    #[test]
    fn best_opportunity_picks_widest_pair() {
        let q = quote_set([
            ("binance", 0.0001, 10.0),
            ("bybit", 0.0004, 20.0),
            ("okx", -0.0003, 30.0),
            ("paradex", 0.0002, 40.0),
        ]);
        let opp = find_best_opportunity(&q, 2.0).unwrap();
        assert_eq!(opp.long_exchange, "okx");
        assert_eq!(opp.short_exchange, "bybit");
        assert!(close(opp.spread_bps, 7.0));
        assert_eq!(opp.combined_open_interest, 50.0);
    }

    #[test]
    fn ties_keep_first_pair_in_iteration_order() {
        // (a, b) and (b, c) both span 10 bps; (a, b) is visited first.
        let q = quote_set([("a", 0.0000, 1.0), ("b", 0.0010, 2.0), ("c", 0.0000, 4.0)]);
        let opp = find_best_opportunity(&q, 0.0).unwrap();
        assert_eq!(opp.long_exchange, "a");
        assert_eq!(opp.short_exchange, "b");
        assert_eq!(opp.combined_open_interest, 3.0);
    }

    #[test]
    fn equal_rates_make_first_exchange_long() {
        let q = quote_set([("x", 0.0005, 1.0), ("y", 0.0005, 1.0)]);
        let opp = find_best_opportunity(&q, 0.0).unwrap();
        assert_eq!(opp.long_exchange, "x");
        assert_eq!(opp.spread_bps, 0.0);
        assert_eq!(find_best_opportunity(&q, 0.5), None);
    }

    #[test]
    fn below_threshold_yields_none() {
        let q = quote_set([("a", 0.0010, 1.0), ("b", 0.0015, 1.0)]);
        assert_eq!(find_best_opportunity(&q, 6.0), None);
        let opp = find_best_opportunity(&q, 4.5).expect("5 bps clears 4.5 bps");
        assert!(close(opp.spread_bps, 5.0));
    }

    #[test]
    fn minimum_is_never_undercut_by_rounding() {
        // 0.009 - 0.004 scales to 49.99999999999999 bps, just short of 50.
        let q = quote_set([("a", 0.0040, 1.0), ("b", 0.0090, 1.0)]);
        assert_eq!(find_best_opportunity(&q, 50.0), None);
        let opp = find_best_opportunity(&q, 49.0).unwrap();
        assert!(opp.spread_bps >= 49.0);
    }

    #[test]
    fn strictly_wider_later_pair_replaces_earlier() {
        let q = quote_set([
            ("a", 0.0, 1.0),
            ("b", 0.001, 1.0),
            ("c", 0.0, 1.0),
            ("d", 0.001 + 5e-17, 1.0),
        ]);
        let opp = find_best_opportunity(&q, 0.0).unwrap();
        assert_eq!(opp.long_exchange, "a");
        assert_eq!(opp.short_exchange, "d");
        assert!(opp.spread_bps > (0.001 - 0.0) * 10_000.0);
    }

    #[test]
    fn sums_open_interest() {
        let q = quote_set([("a", 0.0, 1.5), ("b", 0.0, 2.5), ("c", 0.0, 0.0)]);
        assert_eq!(sum_open_interest(&q), 4.0);
        assert_eq!(sum_open_interest(&QuoteSet::new()), 0.0);
    }
}
