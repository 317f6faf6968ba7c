use std::sync::Arc;

use rust_decimal_macros::dec;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use pocketfx_core::events::DomainEventSink;
use pocketfx_core::session::ExchangeSession;
use pocketfx_rates::{
    CurrencyRates, OpenExchangeRatesConfig, OpenExchangeRatesProvider, RateSnapshot,
    RatesProvider, StaticRatesProvider,
};

pub fn init_tracing() {
    let log_format = std::env::var("PFX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Rates served when no app id is configured.
pub fn offline_snapshot() -> RateSnapshot {
    let rates: CurrencyRates = vec![
        ("USD", dec!(1)),
        ("EUR", dec!(0.92)),
        ("GBP", dec!(0.79)),
        ("UAH", dec!(41.25)),
        ("CHF", dec!(0.88)),
        ("JPY", dec!(149.5)),
        ("PLN", dec!(3.98)),
    ]
    .into_iter()
    .collect();
    RateSnapshot::new("USD", 1_700_000_000, rates)
}

pub fn build_provider(config: &Config) -> Arc<dyn RatesProvider> {
    match &config.app_id {
        Some(app_id) => {
            tracing::info!("Using Open Exchange Rates at {}", config.rates_base_url);
            Arc::new(OpenExchangeRatesProvider::new(
                OpenExchangeRatesConfig::new(app_id.clone())
                    .with_base_url(config.rates_base_url.clone())
                    .with_timeout(config.request_timeout),
            ))
        }
        None => {
            tracing::warn!("PFX_RATES_APP_ID is not set; using offline rates");
            Arc::new(StaticRatesProvider::new(offline_snapshot()))
        }
    }
}

pub fn build_session(config: &Config, event_sink: Arc<dyn DomainEventSink>) -> ExchangeSession {
    ExchangeSession::new(config.session.clone(), build_provider(config), event_sink)
}
