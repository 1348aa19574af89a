use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use common::{PriceSeries, StrategyKind, StrategyResult};

use crate::config::IndicatorConfig;
use crate::strategies::{
    AwesomeOscillatorStrategy, BollingerBandsStrategy, MacdStrategy, ParabolicSarStrategy,
    RsiPatternStrategy,
};
use crate::{ComputationError, Strategy};

/// Holds one instance of every strategy in `StrategyKind::ALL`.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Build every strategy with the configured indicator parameters.
    ///
    /// `cfg` is expected to have passed `IndicatorConfig::validate`.
    pub fn from_config(cfg: &IndicatorConfig) -> Self {
        let strategies: Vec<Arc<dyn Strategy>> = StrategyKind::ALL
            .into_iter()
            .map(|kind| build_strategy(kind, cfg))
            .collect();

        for strategy in &strategies {
            debug!(name = %strategy.name(), "Registered strategy");
        }
        info!(count = strategies.len(), "Strategy registry ready");

        Self { strategies }
    }

    /// Registry over an explicit strategy set, e.g. a subset or test doubles.
    pub fn with_strategies(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }

    pub fn get(&self, kind: StrategyKind) -> Option<&Arc<dyn Strategy>> {
        self.strategies.iter().find(|s| s.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run every strategy in turn on the calling thread.
    ///
    /// Failures are folded into error results; see [`settle`].
    pub fn run_all(&self, series: &PriceSeries) -> BTreeMap<StrategyKind, StrategyResult> {
        self.strategies
            .iter()
            .map(|s| (s.kind(), settle(s.kind(), s.compute(series))))
            .collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::from_config(&IndicatorConfig::default())
    }
}

/// Turn a strategy outcome into the result recorded in the report.
///
/// An `Err` becomes a HOLD / 0.0 placeholder carrying the error message, which
/// the aggregator then skips.
pub fn settle(
    kind: StrategyKind,
    outcome: Result<StrategyResult, ComputationError>,
) -> StrategyResult {
    match outcome {
        Ok(result) => {
            debug!(
                strategy = %kind,
                signal = %result.signal,
                confidence = result.confidence,
                "Strategy evaluated"
            );
            result
        }
        Err(e) => {
            warn!(strategy = %kind, error = %e, "Strategy failed");
            StrategyResult::failed(kind, format!("Strategy failed: {e}"))
        }
    }
}

/// Static help text for every strategy, keyed by strategy.
pub fn describe_strategies() -> BTreeMap<StrategyKind, &'static str> {
    StrategyKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.description()))
        .collect()
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(kind: StrategyKind, cfg: &IndicatorConfig) -> Arc<dyn Strategy> {
    match kind {
        StrategyKind::Macd => {
            let p = &cfg.macd;
            Arc::new(MacdStrategy::new(p.fast, p.slow, p.signal))
        }
        StrategyKind::RsiPattern => Arc::new(RsiPatternStrategy::new(cfg.rsi.period)),
        StrategyKind::BollingerBands => {
            let p = &cfg.bollinger;
            Arc::new(BollingerBandsStrategy::new(p.period, p.std_dev))
        }
        StrategyKind::ParabolicSar => {
            let p = &cfg.parabolic_sar;
            Arc::new(ParabolicSarStrategy::new(p.af_start, p.af_step, p.af_max))
        }
        StrategyKind::AwesomeOscillator => {
            let p = &cfg.awesome_oscillator;
            Arc::new(AwesomeOscillatorStrategy::new(p.fast, p.slow))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::fixtures::from_closes;
    use common::Signal;

    #[test]
    fn registry_holds_every_kind_once() {
        let registry = StrategyRegistry::default();
        assert_eq!(registry.len(), 5);
        for kind in StrategyKind::ALL {
            assert_eq!(registry.get(kind).map(|s| s.kind()), Some(kind));
        }
    }

    #[test]
    fn describe_strategies_has_five_entries() {
        let descriptions = describe_strategies();
        assert_eq!(descriptions.len(), 5);
        assert!(descriptions[&StrategyKind::ParabolicSar].starts_with("Parabolic Stop and Reverse"));
        assert!(descriptions[&StrategyKind::AwesomeOscillator].contains("high-low midpoint"));
    }

    #[test]
    fn short_series_yields_error_placeholders() {
        let series = from_closes(&[100.0, 101.0, 102.0]);
        let results = StrategyRegistry::default().run_all(&series);
        assert_eq!(results.len(), 5);

        // Only parabolic SAR can run on three bars.
        for (kind, result) in &results {
            if *kind == StrategyKind::ParabolicSar {
                assert!(!result.is_error());
            } else {
                assert!(result.is_error(), "{kind} should have failed");
                assert_eq!(result.signal, Signal::Hold);
                assert_eq!(result.confidence, 0.0);
                assert!(result.error.as_deref().unwrap().contains("insufficient data"));
            }
        }
    }

    #[test]
    fn long_series_runs_every_strategy() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let results = StrategyRegistry::default().run_all(&from_closes(&closes));
        assert!(results.values().all(|r| !r.is_error()));
    }

    #[test]
    fn custom_parameters_change_warmup() {
        let mut cfg = IndicatorConfig::default();
        cfg.rsi.period = 3;
        let registry = StrategyRegistry::from_config(&cfg);
        let series = from_closes(&[10.0, 11.0, 12.0, 13.0]);
        let rsi = registry.get(StrategyKind::RsiPattern).unwrap();
        assert!(rsi.compute(&series).is_ok());
    }
}
