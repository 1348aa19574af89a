use thiserror::Error;

use crate::Period;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No data available for {ticker} ({period})")]
    NoData { ticker: String, period: Period },

    #[error("Data provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Invalid ticker '{0}'")]
    InvalidTicker(String),

    #[error("Unsupported period '{0}' (expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)")]
    InvalidPeriod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
