//! Parabolic SAR using Wilder's acceleration factor system.
//!
//! Inherently sequential/stateful: maintains direction, extreme point (EP),
//! and acceleration factor (AF). Starts long with SAR at the first low and
//! EP at the first high.
//!
//! Parameters: af_start (default 0.02), af_step (default 0.02), af_max (default 0.20).

use common::Trend;

use super::{ensure_len, finite};
use crate::ComputationError;

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

/// Recurrence state after one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarPoint {
    pub sar: f64,
    pub trend: Trend,
    pub extreme_point: f64,
    pub acceleration: f64,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            af_start,
            af_step,
            af_max,
        }
    }

    /// Default parameters: 0.02, 0.02, 0.20
    pub fn default_params() -> Self {
        Self::new(0.02, 0.02, 0.20)
    }

    pub fn min_len(&self) -> usize {
        2
    }

    /// Final state after running the recurrence over every bar.
    pub fn compute(&self, highs: &[f64], lows: &[f64]) -> Result<SarPoint, ComputationError> {
        let points = self.compute_series(highs, lows)?;
        let last = points[points.len() - 1];
        finite(last.sar, "parabolic SAR")?;
        Ok(last)
    }

    /// State after every bar, oldest first. Entry 0 is the seed.
    pub fn compute_series(
        &self,
        highs: &[f64],
        lows: &[f64],
    ) -> Result<Vec<SarPoint>, ComputationError> {
        let n = highs.len().min(lows.len());
        ensure_len(n, self.min_len())?;

        let mut trend = Trend::Up;
        let mut sar = lows[0];
        let mut ep = highs[0];
        let mut af = self.af_start;

        let mut points = Vec::with_capacity(n);
        points.push(SarPoint {
            sar,
            trend,
            extreme_point: ep,
            acceleration: af,
        });

        for i in 1..n {
            match trend {
                Trend::Up => {
                    // SAR may not rise above the two previous lows
                    let mut next = sar + af * (ep - sar);
                    next = next.min(lows[i - 1]);
                    if i >= 2 {
                        next = next.min(lows[i - 2]);
                    }

                    if lows[i] <= next {
                        trend = Trend::Down;
                        sar = ep;
                        ep = lows[i];
                        af = self.af_start;
                    } else {
                        sar = next;
                        if highs[i] > ep {
                            ep = highs[i];
                            af = (af + self.af_step).min(self.af_max);
                        }
                    }
                }
                Trend::Down => {
                    // SAR may not fall below the two previous highs
                    let mut next = sar - af * (sar - ep);
                    next = next.max(highs[i - 1]);
                    if i >= 2 {
                        next = next.max(highs[i - 2]);
                    }

                    if highs[i] >= next {
                        trend = Trend::Up;
                        sar = ep;
                        ep = highs[i];
                        af = self.af_start;
                    } else {
                        sar = next;
                        if lows[i] < ep {
                            ep = lows[i];
                            af = (af + self.af_step).min(self.af_max);
                        }
                    }
                }
            }

            points.push(SarPoint {
                sar,
                trend,
                extreme_point: ep,
                acceleration: af,
            });
        }

        Ok(points)
    }
}
