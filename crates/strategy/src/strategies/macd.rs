use common::{IndicatorValues, PriceSeries, Signal, StrategyKind, StrategyResult};

use crate::indicators::{round_to, MacdIndicator};
use crate::{ComputationError, Strategy};

const DESCRIPTION: &str = "MACD momentum analysis based on moving average convergence/divergence";

/// Golden/death cross of the MACD line over its signal line on the latest bar.
#[derive(Debug, Clone)]
pub struct MacdStrategy {
    indicator: MacdIndicator,
}

impl MacdStrategy {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            indicator: MacdIndicator::new(fast, slow, signal),
        }
    }
}

impl Default for MacdStrategy {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Strategy for MacdStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Macd
    }

    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        let closes = series.closes();
        let reading = self.indicator.compute(&closes)?;
        let close = closes[closes.len() - 1];

        // Spread as a percentage of price, capped at 1.
        let cross_strength = ((reading.macd - reading.signal).abs() / close * 100.0).min(1.0);

        let (signal, confidence) = if reading.crossed_up() {
            (Signal::Buy, cross_strength)
        } else if reading.crossed_down() {
            (Signal::Sell, cross_strength)
        } else {
            (Signal::Hold, 0.5)
        };

        Ok(StrategyResult::new(signal, round_to(confidence, 3), DESCRIPTION).with_values(
            IndicatorValues::Macd {
                macd: round_to(reading.macd, 4),
                signal_line: round_to(reading.signal, 4),
                histogram: round_to(reading.histogram, 4),
            },
        ))
    }
}
