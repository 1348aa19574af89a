use async_trait::async_trait;

use crate::{Period, PriceSeries, Result};

/// Abstraction over the upstream market-data source.
///
/// `YahooClient` implements this against the public chart API.
/// `StaticProvider` implements this over in-memory series for offline runs.
///
/// The analyzer makes exactly one `fetch_history` call per analysis and
/// applies no retry or timeout policy of its own.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Daily OHLCV history for `ticker` over the relative window `period`.
    ///
    /// An unknown ticker or an instrument without trading history yields an
    /// empty series, not an error.
    async fn fetch_history(&self, ticker: &str, period: Period) -> Result<PriceSeries>;
}
