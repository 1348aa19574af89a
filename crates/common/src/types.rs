use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// One daily OHLCV sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Carried through from the provider; no indicator reads it.
    pub volume: u64,
}

/// Ordered price history for a single instrument over one period.
///
/// Construction validates the series once so indicators can index into it
/// without re-checking: timestamps strictly increase, prices are positive and
/// finite, and every bar has `low <= high`. An empty series is valid and means
/// the provider had nothing for the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, Error> {
        for (i, bar) in bars.iter().enumerate() {
            let prices = [bar.open, bar.high, bar.low, bar.close];
            if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                return Err(Error::InvalidSeries(format!(
                    "bar {i} ({}) has a non-positive or non-finite price",
                    bar.timestamp
                )));
            }
            if bar.low > bar.high {
                return Err(Error::InvalidSeries(format!(
                    "bar {i} ({}) has low {} above high {}",
                    bar.timestamp, bar.low, bar.high
                )));
            }
            if i > 0 && bars[i - 1].timestamp >= bar.timestamp {
                return Err(Error::InvalidSeries(format!(
                    "timestamps not strictly increasing at bar {i} ({})",
                    bar.timestamp
                )));
            }
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = Error;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

/// Relative history window requested from the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| Error::InvalidPeriod(s.to_string()))
    }
}

/// Directional recommendation emitted by a strategy or the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// The fixed set of indicator strategies. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Macd,
    RsiPattern,
    BollingerBands,
    ParabolicSar,
    AwesomeOscillator,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Macd,
        StrategyKind::RsiPattern,
        StrategyKind::BollingerBands,
        StrategyKind::ParabolicSar,
        StrategyKind::AwesomeOscillator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Macd => "macd",
            StrategyKind::RsiPattern => "rsi_pattern",
            StrategyKind::BollingerBands => "bollinger_bands",
            StrategyKind::ParabolicSar => "parabolic_sar",
            StrategyKind::AwesomeOscillator => "awesome_oscillator",
        }
    }

    /// Help text shown next to each strategy in the UI.
    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Macd => {
                "Moving Average Convergence Divergence - Momentum strategy using short and long term moving averages"
            }
            StrategyKind::RsiPattern => {
                "Relative Strength Index Pattern Recognition - Identifies overbought/oversold conditions"
            }
            StrategyKind::BollingerBands => {
                "Bollinger Bands Pattern Recognition - Volatility and mean reversion analysis"
            }
            StrategyKind::ParabolicSar => {
                "Parabolic Stop and Reverse - Trend following and reversal detection"
            }
            StrategyKind::AwesomeOscillator => {
                "Awesome Oscillator - Enhanced momentum analysis using high-low midpoint"
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parabolic SAR trend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

/// Indicator readings attached to a result for display. Values are rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "indicator", rename_all = "snake_case")]
pub enum IndicatorValues {
    Macd {
        macd: f64,
        signal_line: f64,
        histogram: f64,
    },
    Rsi {
        rsi: f64,
    },
    Bollinger {
        upper_band: f64,
        lower_band: f64,
        price_position: f64,
        band_width: f64,
    },
    ParabolicSar {
        sar_value: f64,
        trend: Trend,
    },
    AwesomeOscillator {
        ao_value: f64,
    },
}

/// Output of one strategy for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub signal: Signal,
    pub confidence: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<IndicatorValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StrategyResult {
    /// Confidence is clamped into `[0, 1]`.
    pub fn new(signal: Signal, confidence: f64, description: impl Into<String>) -> Self {
        Self {
            signal,
            confidence: confidence.clamp(0.0, 1.0),
            description: description.into(),
            pattern: None,
            values: None,
            error: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_values(mut self, values: IndicatorValues) -> Self {
        self.values = Some(values);
        self
    }

    /// Placeholder for a strategy that could not produce a reading.
    pub fn failed(kind: StrategyKind, message: impl Into<String>) -> Self {
        Self {
            signal: Signal::Hold,
            confidence: 0.0,
            description: kind.description().to_string(),
            pattern: None,
            values: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Fused recommendation over all non-error strategy results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub signal: Signal,
    pub confidence: f64,
    pub consensus: String,
    pub signal_strength: f64,
}

/// Everything produced by one `analyze(ticker, period)` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub period: Period,
    pub data_points: usize,
    /// Every strategy's result, including error placeholders.
    pub strategies: BTreeMap<StrategyKind, StrategyResult>,
    #[serde(rename = "overall_recommendation")]
    pub aggregate: AggregateResult,
}
