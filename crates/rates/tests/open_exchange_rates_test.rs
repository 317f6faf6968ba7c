use httpmock::prelude::*;
use pocketfx_rates::{OpenExchangeRatesConfig, OpenExchangeRatesProvider, RatesError, RatesProvider};
use rust_decimal_macros::dec;

fn provider_for(server: &MockServer) -> OpenExchangeRatesProvider {
    OpenExchangeRatesProvider::new(
        OpenExchangeRatesConfig::new("test_app_id").with_base_url(server.url("/api")),
    )
}

fn symbols() -> Vec<String> {
    ["USD", "EUR", "GBP", "UAH"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[tokio::test]
async fn test_fetch_latest_rates() {
    let server = MockServer::start();

    // Raw body so the key order of `rates` reaches the client untouched
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/latest.json")
            .query_param("app_id", "test_app_id")
            .query_param("base", "USD")
            .query_param("symbols", "USD,EUR,GBP,UAH");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{
                    "disclaimer": "Usage subject to terms: https://openexchangerates.org/terms",
                    "license": "https://openexchangerates.org/license",
                    "timestamp": 1700000000,
                    "base": "USD",
                    "rates": {"USD": 1, "EUR": 0.9, "GBP": 0.8, "UAH": 41.5}
                }"#,
            );
    });

    let provider = provider_for(&server);
    let snapshot = provider.fetch_rates(&symbols(), "USD").await.unwrap();

    api_mock.assert();
    assert_eq!(snapshot.base, "USD");
    assert_eq!(snapshot.timestamp, 1_700_000_000);
    assert_eq!(snapshot.currencies(), vec!["USD", "EUR", "GBP", "UAH"]);
    assert_eq!(snapshot.rate("GBP"), Some(dec!(0.8)));
    assert!(snapshot.license.contains("license"));
}

#[tokio::test]
async fn test_fetch_without_symbols() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/latest.json")
            .query_param("base", "USD");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"timestamp": 1, "base": "USD", "rates": {"JPY": 150.1}}"#);
    });

    let provider = provider_for(&server);
    let snapshot = provider.fetch_rates(&[], "USD").await.unwrap();

    api_mock.assert();
    assert_eq!(snapshot.currencies(), vec!["JPY"]);
}

#[tokio::test]
async fn test_invalid_app_id_is_provider_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/latest.json");
        then.status(401)
            .header("content-type", "application/json")
            .body(
                r#"{"error": true, "status": 401, "message": "invalid_app_id", "description": "Invalid App ID provided."}"#,
            );
    });

    let provider = provider_for(&server);
    let err = provider.fetch_rates(&symbols(), "USD").await.unwrap_err();

    match err {
        RatesError::ProviderError { provider, message } => {
            assert_eq!(provider, "OPEN_EXCHANGE_RATES");
            assert!(message.starts_with("invalid_app_id"));
        }
        other => panic!("Expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/latest.json");
        then.status(429);
    });

    let provider = provider_for(&server);
    let err = provider.fetch_rates(&symbols(), "USD").await.unwrap_err();

    assert!(matches!(err, RatesError::RateLimited { .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let provider = OpenExchangeRatesProvider::new(
        OpenExchangeRatesConfig::new("test_app_id").with_base_url("http://127.0.0.1:1"),
    );

    let err = provider.fetch_rates(&symbols(), "USD").await.unwrap_err();
    assert!(matches!(
        err,
        RatesError::Network(_) | RatesError::Timeout { .. }
    ));
}
