use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use common::{
    Bar, Error, MarketDataProvider, Period, PriceSeries, Signal, StrategyKind, StrategyResult,
};
use engine::{Analyzer, StaticProvider};
use strategy::{ComputationError, Strategy, StrategyRegistry};

fn series(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            timestamp: start + Duration::days(i as i64),
            open: c,
            high: c + 1.0,
            low: c - 1.0,
            close: c,
            volume: 10_000,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn wavy(n: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
    series(&closes)
}

/// Counts how many times it was evaluated.
struct CountingStrategy {
    kind: StrategyKind,
    calls: Arc<AtomicUsize>,
}

impl Strategy for CountingStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn compute(&self, _series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StrategyResult::new(Signal::Buy, 0.9, "counted"))
    }
}

struct PanickingStrategy;

impl Strategy for PanickingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BollingerBands
    }

    fn compute(&self, _series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        panic!("indicator blew up");
    }
}

struct NanStrategy;

impl Strategy for NanStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AwesomeOscillator
    }

    fn compute(&self, _series: &PriceSeries) -> Result<StrategyResult, ComputationError> {
        Err(ComputationError::NonFinite("awesome oscillator"))
    }
}

/// Records how many fetches reached the provider.
#[derive(Default)]
struct CountingProvider {
    fetches: AtomicUsize,
}

#[async_trait]
impl MarketDataProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn fetch_history(&self, _ticker: &str, _period: Period) -> common::Result<PriceSeries> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(wavy(60))
    }
}

#[tokio::test]
async fn blank_ticker_is_rejected_before_fetching() {
    let provider = Arc::new(CountingProvider::default());
    let analyzer = Analyzer::new(provider.clone(), StrategyRegistry::default());

    for blank in ["", "   ", "\t\n"] {
        let err = analyzer.analyze(blank, Period::OneYear).await.unwrap_err();
        assert!(matches!(err, Error::InvalidTicker(_)), "{blank:?} gave {err:?}");
    }
    assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);

    // Surrounding whitespace alone is trimmed.
    let report = analyzer.analyze("  SPY ", Period::OneYear).await.unwrap();
    assert_eq!(report.ticker, "SPY");
    assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_ticker_is_no_data_and_runs_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = StrategyRegistry::with_strategies(vec![Arc::new(CountingStrategy {
        kind: StrategyKind::Macd,
        calls: Arc::clone(&calls),
    })]);
    let analyzer = Analyzer::new(Arc::new(StaticProvider::new()), registry);

    let err = analyzer.analyze("NOPE", Period::OneYear).await.unwrap_err();
    match err {
        Error::NoData { ticker, period } => {
            assert_eq!(ticker, "NOPE");
            assert_eq!(period, Period::OneYear);
        }
        other => panic!("expected NoData, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn full_report_has_every_strategy() {
    let provider = StaticProvider::new().with_series("AAPL", wavy(120));
    let analyzer = Analyzer::new(Arc::new(provider), StrategyRegistry::default());

    let report = analyzer.analyze("AAPL", Period::SixMonths).await.unwrap();
    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.period, Period::SixMonths);
    assert_eq!(report.data_points, 120);
    assert_eq!(report.strategies.len(), 5);
    for kind in StrategyKind::ALL {
        let result = &report.strategies[&kind];
        assert!(!result.is_error(), "{kind} failed: {:?}", result.error);
        assert!((0.0..=1.0).contains(&result.confidence));
    }
    assert!((0.0..=1.0).contains(&report.aggregate.confidence));
    assert!(!report.aggregate.consensus.is_empty());
}

#[tokio::test]
async fn short_history_reports_per_strategy_errors() {
    let provider = StaticProvider::new().with_series("IPO", series(&[10.0, 10.5, 11.0, 11.2, 11.1]));
    let analyzer = Analyzer::new(Arc::new(provider), StrategyRegistry::default());

    let report = analyzer.analyze("IPO", Period::FiveDays).await.unwrap();
    assert_eq!(report.data_points, 5);
    assert_eq!(report.strategies.len(), 5);
    assert!(!report.strategies[&StrategyKind::ParabolicSar].is_error());
    for kind in [
        StrategyKind::Macd,
        StrategyKind::RsiPattern,
        StrategyKind::BollingerBands,
        StrategyKind::AwesomeOscillator,
    ] {
        let result = &report.strategies[&kind];
        assert!(result.is_error());
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, 0.0);
    }
    // Only the SAR vote is counted.
    let agg = &report.aggregate;
    let tallied: usize = agg
        .consensus
        .split(", ")
        .filter_map(|part| part.split_whitespace().next())
        .filter_map(|n| n.parse::<usize>().ok())
        .sum();
    assert_eq!(tallied, 1);
}

#[tokio::test]
async fn failing_and_panicking_strategies_are_isolated() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = StrategyRegistry::with_strategies(vec![
        Arc::new(CountingStrategy {
            kind: StrategyKind::Macd,
            calls: Arc::clone(&calls),
        }),
        Arc::new(PanickingStrategy),
        Arc::new(NanStrategy),
    ]);
    let provider = StaticProvider::new().with_series("MSFT", wavy(40));
    let analyzer = Analyzer::new(Arc::new(provider), registry);

    let report = analyzer.analyze("msft", Period::OneYear).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.strategies.len(), 3);

    let panicked = &report.strategies[&StrategyKind::BollingerBands];
    assert!(panicked.is_error());
    assert_eq!(panicked.signal, Signal::Hold);

    let nan = &report.strategies[&StrategyKind::AwesomeOscillator];
    assert!(nan.error.as_deref().unwrap().starts_with("Strategy failed:"));

    assert_eq!(report.aggregate.signal, Signal::Buy);
    assert_eq!(report.aggregate.consensus, "1 BUY, 0 SELL, 0 HOLD");
    assert_eq!(report.aggregate.confidence, 0.9);
}

#[tokio::test]
async fn analyze_is_idempotent() {
    let provider = StaticProvider::new().with_series("SPY", wavy(90));
    let analyzer = Analyzer::new(Arc::new(provider), StrategyRegistry::default());

    let first = analyzer.analyze("SPY", Period::OneYear).await.unwrap();
    let second = analyzer.analyze("SPY", Period::OneYear).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn report_serializes_with_overall_recommendation() {
    let provider = StaticProvider::new().with_series("QQQ", wavy(60));
    let analyzer = Analyzer::new(Arc::new(provider), StrategyRegistry::default());

    let report = analyzer.analyze("QQQ", Period::ThreeMonths).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["period"], "3mo");
    assert_eq!(json["data_points"], 60);
    assert!(json["overall_recommendation"]["signal"].is_string());
    assert!(json["strategies"]["parabolic_sar"]["signal"].is_string());
}
