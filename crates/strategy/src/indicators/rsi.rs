use super::{ensure_len, finite};
use crate::ComputationError;

/// RSI (Relative Strength Index) indicator.
///
/// Uses a simple rolling mean of gains and losses over the last `period`
/// close-to-close changes (not Wilder smoothing). Needs `period + 1` closes.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    pub fn min_len(&self) -> usize {
        self.period + 1
    }

    /// Compute the latest RSI from close prices (oldest first).
    ///
    /// A window with no losses reads 100.
    pub fn compute(&self, closes: &[f64]) -> Result<f64, ComputationError> {
        ensure_len(closes.len(), self.min_len())?;

        let window = &closes[closes.len() - self.min_len()..];
        let (gains, losses) = window
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(g, l), change| {
                if change > 0.0 {
                    (g + change, l)
                } else {
                    (g, l - change)
                }
            });

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return Ok(100.0);
        }

        let rs = avg_gain / avg_loss;
        finite(100.0 - 100.0 / (1.0 + rs), "RSI")
    }
}
