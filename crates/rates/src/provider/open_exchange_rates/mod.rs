//! Open Exchange Rates provider.
//!
//! Fetches the `latest.json` endpoint, which returns the payload shape
//! [`RateSnapshot`] is modelled on:
//!
//! ```json
//! {
//!   "disclaimer": "...",
//!   "license": "...",
//!   "timestamp": 1700000000,
//!   "base": "USD",
//!   "rates": { "EUR": 0.91, "GBP": 0.79 }
//! }
//! ```
//!
//! Failures come back as `{"error": true, "status": 401, "message": "invalid_app_id", ...}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::RatesError;
use crate::models::RateSnapshot;
use crate::provider::RatesProvider;

/// Provider ID constant
pub const PROVIDER_ID: &str = "OPEN_EXCHANGE_RATES";

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org/api";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by the API on failure
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[allow(dead_code)]
    error: bool,
    status: Option<u16>,
    message: Option<String>,
    description: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> String {
        match (self.message, self.description) {
            (Some(message), Some(description)) => format!("{}: {}", message, description),
            (Some(message), None) => message,
            (None, Some(description)) => description,
            (None, None) => format!("status {}", self.status.unwrap_or_default()),
        }
    }
}

/// Connection settings for [`OpenExchangeRatesProvider`].
#[derive(Clone, Debug)]
pub struct OpenExchangeRatesConfig {
    pub app_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenExchangeRatesConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Open Exchange Rates provider.
///
/// # Example
///
/// ```ignore
/// use pocketfx_rates::{OpenExchangeRatesConfig, OpenExchangeRatesProvider};
///
/// let provider = OpenExchangeRatesProvider::new(OpenExchangeRatesConfig::new("your_app_id"));
/// ```
pub struct OpenExchangeRatesProvider {
    client: Client,
    config: OpenExchangeRatesConfig,
}

impl OpenExchangeRatesProvider {
    pub fn new(config: OpenExchangeRatesConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn latest_url(&self) -> String {
        format!("{}/latest.json", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(err: reqwest::Error) -> RatesError {
        if err.is_timeout() {
            RatesError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            RatesError::Network(err)
        }
    }

    fn parse_body(status: StatusCode, body: &str) -> Result<RateSnapshot, RatesError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RatesError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(ErrorResponse::into_message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(RatesError::provider(PROVIDER_ID, message));
        }

        match serde_json::from_str::<RateSnapshot>(body) {
            Ok(snapshot) => {
                snapshot.validate()?;
                Ok(snapshot)
            }
            Err(parse_err) => {
                let message = serde_json::from_str::<ErrorResponse>(body)
                    .map(ErrorResponse::into_message)
                    .unwrap_or_else(|_| format!("Malformed response: {}", parse_err));
                Err(RatesError::provider(PROVIDER_ID, message))
            }
        }
    }

    #[tracing::instrument(skip(self, symbols), fields(provider = PROVIDER_ID, symbols = symbols.len()))]
    async fn request_latest(
        &self,
        symbols: &[String],
        base: &str,
    ) -> Result<RateSnapshot, RatesError> {
        let mut query = vec![
            ("app_id", self.config.app_id.clone()),
            ("base", base.to_string()),
        ];
        if !symbols.is_empty() {
            query.push(("symbols", symbols.join(",")));
        }

        let response = self
            .client
            .get(self.latest_url())
            .query(&query)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::map_transport_error)?;
        tracing::debug!(%status, bytes = body.len(), "received rates response");

        let snapshot = Self::parse_body(status, &body)?;
        tracing::debug!(
            base = %snapshot.base,
            timestamp = snapshot.timestamp,
            currencies = snapshot.rates.len(),
            "parsed rate snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl RatesProvider for OpenExchangeRatesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_rates(
        &self,
        symbols: &[String],
        base: &str,
    ) -> Result<RateSnapshot, RatesError> {
        self.request_latest(symbols, base).await
    }
}
