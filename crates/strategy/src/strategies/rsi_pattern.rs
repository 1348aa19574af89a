use common::{IndicatorValues, PriceSeries, Signal, StrategyKind, StrategyResult};

use crate::indicators::{round_to, RsiIndicator};
use crate::{ComputationError, Strategy};

const DESCRIPTION: &str = "RSI pattern recognition for momentum and reversal signals";

const OVERBOUGHT: f64 = 70.0;
const OVERSOLD: f64 = 30.0;
const MIDLINE: f64 = 50.0;

/// Overbought/oversold classification of the latest RSI value.
#[derive(Debug, Clone)]
pub struct RsiPatternStrategy {
    indicator: RsiIndicator,
}

impl RsiPatternStrategy {
    pub fn new(period: usize) -> Self {
        Self {
            indicator: RsiIndicator::new(period),
        }
    }
}

impl Default for RsiPatternStrategy {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Strategy for RsiPatternStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RsiPattern
    }

    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        let rsi = self.indicator.compute(&series.closes())?;

        let (signal, confidence, pattern) = if rsi > OVERBOUGHT {
            (Signal::Sell, ((rsi - OVERBOUGHT) / 30.0).min(1.0), "Overbought")
        } else if rsi < OVERSOLD {
            (Signal::Buy, ((OVERSOLD - rsi) / 30.0).min(1.0), "Oversold")
        } else if rsi > MIDLINE {
            (Signal::Hold, 0.3, "Bullish Momentum")
        } else {
            (Signal::Hold, 0.3, "Bearish Momentum")
        };

        Ok(StrategyResult::new(signal, round_to(confidence, 3), DESCRIPTION)
            .with_pattern(pattern)
            .with_values(IndicatorValues::Rsi {
                rsi: round_to(rsi, 2),
            }))
    }
}
