use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use common::{MarketDataProvider, Period, PriceSeries, Result};

/// In-memory provider keyed by upper-cased ticker.
///
/// Returns the same series for every period. Unknown tickers yield an empty
/// series, mirroring how the chart API reports unknown symbols.
#[derive(Default)]
pub struct StaticProvider {
    series: RwLock<HashMap<String, PriceSeries>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, ticker: &str, series: PriceSeries) -> Self {
        self.insert(ticker, series);
        self
    }

    pub fn insert(&self, ticker: &str, series: PriceSeries) {
        let mut map = self.series.write().unwrap_or_else(|e| e.into_inner());
        map.insert(ticker.to_uppercase(), series);
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_history(&self, ticker: &str, _period: Period) -> Result<PriceSeries> {
        let map = self.series.read().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(&ticker.to_uppercase()).cloned().unwrap_or_default())
    }
}
