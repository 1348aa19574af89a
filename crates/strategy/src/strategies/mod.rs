//! Indicator readings mapped to BUY/SELL/HOLD with a confidence score.
//!
//! Each strategy is a pure function of the price series. Confidence constants
//! and thresholds are fixed; only the indicator windows are configurable.

mod awesome;
mod bollinger;
mod macd;
mod parabolic_sar;
mod rsi_pattern;

pub use awesome::AwesomeOscillatorStrategy;
pub use bollinger::BollingerBandsStrategy;
pub use macd::MacdStrategy;
pub use parabolic_sar::ParabolicSarStrategy;
pub use rsi_pattern::RsiPatternStrategy;
