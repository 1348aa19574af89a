use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, error, info};

use common::{AnalysisReport, Error, MarketDataProvider, Period, PriceSeries, Result, StrategyKind, StrategyResult};
use strategy::{aggregate, registry::settle, StrategyRegistry};

/// Runs one full analysis: fetch history, evaluate every strategy, fuse.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct Analyzer {
    provider: Arc<dyn MarketDataProvider>,
    registry: StrategyRegistry,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>, registry: StrategyRegistry) -> Self {
        Self { provider, registry }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Analyse `ticker` over `period`.
    ///
    /// Fails on a blank ticker, when the provider errors, or when it has no
    /// bars; individual strategy failures are recorded in the report and left
    /// out of the aggregate.
    pub async fn analyze(&self, ticker: &str, period: Period) -> Result<AnalysisReport> {
        let raw = ticker;
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(Error::InvalidTicker(raw.to_string()));
        }

        let series = self.provider.fetch_history(ticker, period).await?;

        if series.is_empty() {
            info!(%ticker, %period, provider = %self.provider.name(), "No price history");
            return Err(Error::NoData {
                ticker: ticker.to_string(),
                period,
            });
        }

        let data_points = series.len();
        debug!(%ticker, %period, data_points, "Price history loaded");

        let strategies = self.evaluate(Arc::new(series)).await;
        let aggregate = aggregate(&strategies);

        info!(
            %ticker,
            %period,
            data_points,
            signal = %aggregate.signal,
            confidence = aggregate.confidence,
            consensus = %aggregate.consensus,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            ticker: ticker.to_string(),
            period,
            data_points,
            strategies,
            aggregate,
        })
    }

    /// One blocking task per strategy over the shared series, joined before returning.
    async fn evaluate(&self, series: Arc<PriceSeries>) -> BTreeMap<StrategyKind, StrategyResult> {
        let tasks = self.registry.strategies().iter().map(|strategy| {
            let strategy = Arc::clone(strategy);
            let series = Arc::clone(&series);
            let kind = strategy.kind();
            async move {
                let joined = tokio::task::spawn_blocking(move || strategy.compute(&series)).await;
                let result = match joined {
                    Ok(outcome) => settle(kind, outcome),
                    Err(e) => {
                        error!(strategy = %kind, error = %e, "Strategy task aborted");
                        StrategyResult::failed(kind, format!("Strategy failed: {e}"))
                    }
                };
                (kind, result)
            }
        });

        join_all(tasks).await.into_iter().collect()
    }
}
