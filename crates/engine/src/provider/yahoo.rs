use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use common::{Bar, Error, MarketDataProvider, Period, PriceSeries, Result};

/// Daily OHLCV history from the Yahoo Finance v8 chart API.
///
/// One GET per call; no retries. Unknown symbols come back as an empty series.
pub struct YahooClient {
    base_url: Url,
    http: Client,
}

impl YahooClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| Error::Config(format!("invalid Yahoo base URL '{}': {e}", base_url.as_ref())))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("Yahoo base URL '{base_url}' cannot hold a path")));
        }
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) signal-engine")
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    /// `{base}/v8/finance/chart/{ticker}` with the ticker percent-encoded as
    /// a single path segment, so `?`, `#` or `/` cannot reshape the request.
    fn chart_url(&self, ticker: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart"])
                .push(ticker);
        }
        url
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn fetch_history(&self, ticker: &str, period: Period) -> Result<PriceSeries> {
        let url = self.chart_url(ticker);
        debug!(%ticker, %period, "Fetching chart history");

        let resp = self
            .http
            .get(url)
            .query(&[("range", period.as_str()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        // 404 carries a chart error body for unknown symbols.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Error::Provider(format!("HTTP {status}: {body}")));
        }

        parse_chart(ticker, &body)
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Turn a chart API body into a validated series.
///
/// Bars with any missing or unusable OHLC value are dropped, as are repeated
/// timestamps (the live bar is sometimes echoed at the end of the array).
pub(crate) fn parse_chart(ticker: &str, body: &str) -> Result<PriceSeries> {
    let resp: ChartResponse = serde_json::from_str(body)
        .map_err(|e| Error::Provider(format!("unexpected chart response for {ticker}: {e}")))?;

    if let Some(err) = resp.chart.error {
        if err.code == "Not Found" {
            debug!(%ticker, "Symbol not found");
            return Ok(PriceSeries::empty());
        }
        return Err(Error::Provider(format!("{}: {}", err.code, err.description)));
    }

    let Some(data) = resp.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty());
    };
    let Some(timestamps) = data.timestamp else {
        return Ok(PriceSeries::empty());
    };
    let Some(quote) = data.indicators.quote.into_iter().next() else {
        return Ok(PriceSeries::empty());
    };

    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();
    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
            skipped += 1;
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close)) = (
            at(&quote.open, i),
            at(&quote.high, i),
            at(&quote.low, i),
            at(&quote.close, i),
        ) else {
            skipped += 1;
            continue;
        };

        let usable = [open, high, low, close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
            && low <= high;
        let ordered = bars.last().map_or(true, |prev| prev.timestamp < timestamp);
        if !usable || !ordered {
            skipped += 1;
            continue;
        }

        bars.push(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    if skipped > 0 {
        warn!(%ticker, skipped, kept = bars.len(), "Dropped unusable chart bars");
    }

    PriceSeries::new(bars)
}
