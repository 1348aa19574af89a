use common::{IndicatorValues, PriceSeries, Signal, StrategyKind, StrategyResult, Trend};

use crate::indicators::{round_to, ParabolicSar};
use crate::{ComputationError, Strategy};

const DESCRIPTION: &str = "Parabolic SAR trend following and reversal detection";

/// Final SAR trend state checked against the latest close.
#[derive(Debug, Clone)]
pub struct ParabolicSarStrategy {
    indicator: ParabolicSar,
}

impl ParabolicSarStrategy {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        Self {
            indicator: ParabolicSar::new(af_start, af_step, af_max),
        }
    }
}

impl Default for ParabolicSarStrategy {
    fn default() -> Self {
        Self {
            indicator: ParabolicSar::default_params(),
        }
    }
}

impl Strategy for ParabolicSarStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ParabolicSar
    }

    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        let state = self
            .indicator
            .compute(&series.highs(), &series.lows())?;
        let close = series
            .last()
            .map(|b| b.close)
            .ok_or(ComputationError::InsufficientData { required: 2, available: 0 })?;

        let (signal, confidence, pattern) = match state.trend {
            Trend::Up if close > state.sar => (Signal::Buy, 0.7, "Uptrend"),
            Trend::Down if close < state.sar => (Signal::Sell, 0.7, "Downtrend"),
            // Price on the wrong side of its own stop: a flip is close.
            _ => (Signal::Hold, 0.5, "Reversal Zone"),
        };

        Ok(StrategyResult::new(signal, confidence, DESCRIPTION)
            .with_pattern(pattern)
            .with_values(IndicatorValues::ParabolicSar {
                sar_value: round_to(state.sar, 2),
                trend: state.trend,
            }))
    }
}
