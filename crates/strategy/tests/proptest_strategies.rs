use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use common::{Bar, PriceSeries, Signal, StrategyKind, StrategyResult};
use proptest::prelude::*;
use strategy::{aggregate, StrategyRegistry};

/// Random walk of closes with a high/low envelope around each bar.
fn series_from_walk(start: f64, steps: &[(f64, f64)]) -> PriceSeries {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    let mut close = start;
    let bars = steps
        .iter()
        .enumerate()
        .map(|(i, &(pct, spread))| {
            close = (close * (1.0 + pct)).max(0.01);
            Bar {
                timestamp: t0 + Duration::days(i as i64),
                open: close,
                high: close * (1.0 + spread),
                low: close * (1.0 - spread),
                close,
                volume: 0,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Buy), Just(Signal::Sell), Just(Signal::Hold)]
}

proptest! {
    /// Every non-error result has a confidence in [0, 1], whatever the path.
    #[test]
    fn strategy_confidence_is_bounded(
        start in 1.0f64..10_000.0,
        steps in prop::collection::vec((-0.2f64..0.2, 0.0f64..0.1), 1..120),
    ) {
        let series = series_from_walk(start, &steps);
        let results = StrategyRegistry::default().run_all(&series);
        prop_assert_eq!(results.len(), 5);
        for result in results.values() {
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            if result.is_error() {
                prop_assert_eq!(result.signal, Signal::Hold);
                prop_assert_eq!(result.confidence, 0.0);
            }
        }
        let agg = aggregate(&results);
        prop_assert!((0.0..=1.0).contains(&agg.confidence));
        prop_assert!((0.0..=1.0).contains(&agg.signal_strength));
    }

    /// The aggregate stays in range and its tally covers every valid vote.
    #[test]
    fn aggregate_is_bounded(
        votes in prop::collection::vec((signal_strategy(), 0.0f64..=1.0, any::<bool>()), 5),
    ) {
        let results: BTreeMap<StrategyKind, StrategyResult> = StrategyKind::ALL
            .into_iter()
            .zip(votes)
            .map(|(kind, (signal, confidence, failed))| {
                let r = if failed {
                    StrategyResult::failed(kind, "failed")
                } else {
                    StrategyResult::new(signal, confidence, "generated")
                };
                (kind, r)
            })
            .collect();

        let agg = aggregate(&results);
        prop_assert!((0.0..=1.0).contains(&agg.confidence));
        prop_assert!((0.0..=1.0).contains(&agg.signal_strength));

        let valid = results.values().filter(|r| !r.is_error()).count();
        if valid == 0 {
            prop_assert_eq!(agg.consensus.as_str(), "No valid signals");
        } else {
            let counts: usize = agg
                .consensus
                .split(", ")
                .map(|part| part.split(' ').next().unwrap().parse::<usize>().unwrap())
                .sum();
            prop_assert_eq!(counts, valid);
        }
    }

    /// Running twice over the same series gives identical results.
    #[test]
    fn run_all_is_deterministic(
        steps in prop::collection::vec((-0.05f64..0.05, 0.0f64..0.03), 40..80),
    ) {
        let series = series_from_walk(100.0, &steps);
        let registry = StrategyRegistry::default();
        prop_assert_eq!(registry.run_all(&series), registry.run_all(&series));
    }
}
