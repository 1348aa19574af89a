use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{Error, MarketDataProvider, Period};
use engine::YahooClient;

fn client(server: &MockServer) -> YahooClient {
    YahooClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_daily_bars_for_period() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD" },
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": { "quote": [{
                    "open":   [187.15, 184.22, 182.15],
                    "high":   [188.44, 185.88, 183.09],
                    "low":    [183.89, 183.43, 180.88],
                    "close":  [185.64, 184.25, 181.91],
                    "volume": [82488700, 58414500, 71983600]
                }]}
            }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "6mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let series = client(&server)
        .fetch_history("AAPL", Period::SixMonths)
        .await
        .unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.last().unwrap().close, 181.91);
}

#[tokio::test]
async fn unknown_symbol_is_empty_not_error() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/ZZZZ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let series = client(&server)
        .fetch_history("ZZZZ", Period::OneYear)
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn server_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_history("AAPL", Period::OneYear)
        .await
        .unwrap_err();
    match err {
        Error::Provider(msg) => assert!(msg.contains("500")),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    // Nothing listens on the discard port.
    let client = YahooClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = client.fetch_history("AAPL", Period::OneYear).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn ticker_cannot_override_query_parameters() {
    let server = MockServer::start().await;
    let not_found = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found))
        .mount(&server)
        .await;

    let series = client(&server)
        .fetch_history("AAPL?range=max", Period::OneMonth)
        .await
        .unwrap();
    assert!(series.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let url = &requests[0].url;
    assert_eq!(url.path(), "/v8/finance/chart/AAPL%3Frange=max");
    let ranges: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "range")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(ranges, vec!["1mo".to_string()]);
}
