use common::{IndicatorValues, PriceSeries, Signal, StrategyKind, StrategyResult};

use crate::indicators::{round_to, AwesomeOscillator};
use crate::{ComputationError, Strategy};

const DESCRIPTION: &str = "Awesome Oscillator momentum analysis using high-low midpoint";

/// Zero-line crosses and saucer patterns on the last three AO values.
#[derive(Debug, Clone)]
pub struct AwesomeOscillatorStrategy {
    indicator: AwesomeOscillator,
}

impl AwesomeOscillatorStrategy {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self {
            indicator: AwesomeOscillator::new(fast, slow),
        }
    }
}

impl Default for AwesomeOscillatorStrategy {
    fn default() -> Self {
        Self {
            indicator: AwesomeOscillator::default_params(),
        }
    }
}

impl Strategy for AwesomeOscillatorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AwesomeOscillator
    }

    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        let ao = self.indicator.compute(&series.highs(), &series.lows())?;
        let (ao0, ao1, ao2) = (ao.current, ao.previous, ao.before_previous);

        // Zero-line crosses take precedence over saucers.
        let (signal, confidence, pattern) = if ao0 > 0.0 && ao1 <= 0.0 {
            (Signal::Buy, 0.8, "Zero Line Cross Up")
        } else if ao0 < 0.0 && ao1 >= 0.0 {
            (Signal::Sell, 0.8, "Zero Line Cross Down")
        } else if ao0 > ao1 && ao1 > ao2 && ao0 > 0.0 {
            (Signal::Buy, 0.6, "Bullish Saucer")
        } else if ao0 < ao1 && ao1 < ao2 && ao0 < 0.0 {
            (Signal::Sell, 0.6, "Bearish Saucer")
        } else {
            (Signal::Hold, 0.3, "No Clear Pattern")
        };

        Ok(StrategyResult::new(signal, confidence, DESCRIPTION)
            .with_pattern(pattern)
            .with_values(IndicatorValues::AwesomeOscillator {
                ao_value: round_to(ao0, 4),
            }))
    }
}
