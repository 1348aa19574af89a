//! Confidence-weighted vote over the strategy results of one analysis.

use std::collections::BTreeMap;

use common::{AggregateResult, Signal, StrategyKind, StrategyResult};

use crate::indicators::round_to;

/// Mean weighted vote needed for an overall BUY (or, negated, SELL).
pub const SIGNAL_THRESHOLD: f64 = 0.3;

/// Fuse per-strategy results into one recommendation.
///
/// Error results are skipped. Each remaining result votes +confidence (BUY),
/// −confidence (SELL) or 0 (HOLD); the mean vote decides the overall signal
/// against ±[`SIGNAL_THRESHOLD`]. The consensus string tallies the unweighted
/// directions.
pub fn aggregate(results: &BTreeMap<StrategyKind, StrategyResult>) -> AggregateResult {
    let valid: Vec<&StrategyResult> = results.values().filter(|r| !r.is_error()).collect();

    if valid.is_empty() {
        return AggregateResult {
            signal: Signal::Hold,
            confidence: 0.0,
            consensus: "No valid signals".to_string(),
            signal_strength: 0.0,
        };
    }

    let n = valid.len() as f64;
    let mut buy_weight = 0.0;
    let mut sell_weight = 0.0;
    let (mut buys, mut sells, mut holds) = (0usize, 0usize, 0usize);

    for r in &valid {
        match r.signal {
            Signal::Buy => {
                buy_weight += r.confidence;
                buys += 1;
            }
            Signal::Sell => {
                sell_weight += r.confidence;
                sells += 1;
            }
            Signal::Hold => holds += 1,
        }
    }

    let avg_signal = (buy_weight - sell_weight) / n;
    let avg_confidence = valid.iter().map(|r| r.confidence).sum::<f64>() / n;

    let signal = if avg_signal > SIGNAL_THRESHOLD {
        Signal::Buy
    } else if avg_signal < -SIGNAL_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Hold
    };

    AggregateResult {
        signal,
        confidence: round_to(avg_confidence, 3),
        consensus: format!("{buys} BUY, {sells} SELL, {holds} HOLD"),
        signal_strength: round_to(avg_signal.abs(), 3),
    }
}
