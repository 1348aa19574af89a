use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Indicator parameter file (TOML). Every section and field is optional and
/// defaults to the standard settings.
///
/// Example `config/indicators.toml`:
/// ```toml
/// [macd]
/// fast = 12
/// slow = 26
/// signal = 9
///
/// [parabolic_sar]
/// af_start = 0.02
/// af_step = 0.02
/// af_max = 0.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub macd: MacdParams,
    pub rsi: RsiParams,
    pub bollinger: BollingerParams,
    pub parabolic_sar: ParabolicSarParams,
    pub awesome_oscillator: AwesomeParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self { fast: 12, slow: 26, signal: 9 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self { period: 20, std_dev: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParabolicSarParams {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

impl Default for ParabolicSarParams {
    fn default() -> Self {
        Self { af_start: 0.02, af_step: 0.02, af_max: 0.2 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AwesomeParams {
    pub fast: usize,
    pub slow: usize,
}

impl Default for AwesomeParams {
    fn default() -> Self {
        Self { fast: 5, slow: 34 }
    }
}

impl IndicatorConfig {
    /// Load and validate a TOML parameter file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let cfg: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject parameter combinations the indicator constructors would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        let m = &self.macd;
        if m.fast == 0 || m.signal == 0 || m.fast >= m.slow {
            return invalid("macd requires 0 < fast < slow and signal > 0");
        }
        if self.rsi.period < 2 {
            return invalid("rsi.period must be >= 2");
        }
        let b = &self.bollinger;
        if b.period < 2 || !(b.std_dev > 0.0 && b.std_dev.is_finite()) {
            return invalid("bollinger requires period >= 2 and a finite std_dev > 0");
        }
        let p = &self.parabolic_sar;
        let factors_finite = [p.af_start, p.af_step, p.af_max].iter().all(|f| f.is_finite());
        if !(factors_finite && p.af_start > 0.0 && p.af_step > 0.0 && p.af_max >= p.af_start) {
            return invalid(
                "parabolic_sar requires finite factors with af_start > 0, af_step > 0, af_max >= af_start",
            );
        }
        let a = &self.awesome_oscillator;
        if a.fast == 0 || a.fast >= a.slow {
            return invalid("awesome_oscillator requires 0 < fast < slow");
        }
        Ok(())
    }
}
