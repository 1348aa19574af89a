use common::{IndicatorValues, PriceSeries, Signal, StrategyKind, StrategyResult};

use crate::indicators::{round_to, BollingerBands, BollingerIndicator};
use crate::{ComputationError, Strategy};

const DESCRIPTION: &str = "Bollinger Bands volatility and mean reversion analysis";

/// Band breaches and proximity of the latest close.
#[derive(Debug, Clone)]
pub struct BollingerBandsStrategy {
    indicator: BollingerIndicator,
}

impl BollingerBandsStrategy {
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            indicator: BollingerIndicator::new(period, std_dev),
        }
    }
}

impl Default for BollingerBandsStrategy {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Strategy for BollingerBandsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BollingerBands
    }

    fn compute(&self, series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        let closes = series.closes();
        let bands = self.indicator.compute(&closes)?;
        let close = closes[closes.len() - 1];

        let (signal, confidence, pattern) = classify(close, &bands);
        // Collapsed bands report the midpoint position.
        let position = bands.position(close).unwrap_or(0.5);

        Ok(StrategyResult::new(signal, round_to(confidence, 3), DESCRIPTION)
            .with_pattern(pattern)
            .with_values(IndicatorValues::Bollinger {
                upper_band: round_to(bands.upper, 2),
                lower_band: round_to(bands.lower, 2),
                price_position: round_to(position, 3),
                band_width: round_to(bands.width(), 4),
            }))
    }
}

/// Signal, unrounded confidence and pattern for `close` against `bands`.
///
/// A close above the upper band or at/below the lower band is a breach;
/// otherwise the position inside the bands decides.
fn classify(close: f64, bands: &BollingerBands) -> (Signal, f64, &'static str) {
    let Some(position) = bands.position(close) else {
        return (Signal::Hold, 0.2, "Within Bands");
    };

    if close > bands.upper {
        (Signal::Sell, ((close - bands.upper) / bands.upper).min(1.0), "Upper Band Breach")
    } else if close <= bands.lower {
        (Signal::Buy, ((bands.lower - close) / bands.lower).min(1.0), "Lower Band Breach")
    } else if position > 0.8 {
        (Signal::Hold, 0.4, "Near Upper Band")
    } else if position < 0.2 {
        (Signal::Hold, 0.4, "Near Lower Band")
    } else {
        (Signal::Hold, 0.2, "Within Bands")
    }
}
