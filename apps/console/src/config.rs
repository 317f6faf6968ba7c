use std::time::Duration;

use pocketfx_core::accounts::SeedMode;
use pocketfx_core::session::SessionConfig;
use pocketfx_rates::provider::open_exchange_rates::DEFAULT_BASE_URL;

pub struct Config {
    /// Open Exchange Rates app id. Without one the bundled static rates are used.
    pub app_id: Option<String>,
    pub rates_base_url: String,
    pub request_timeout: Duration,
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SessionConfig::default();

        let app_id = lookup("PFX_RATES_APP_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let rates_base_url =
            lookup("PFX_RATES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_ms: u64 = lookup("PFX_RATES_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(30000);

        let symbols: Vec<String> = lookup("PFX_SYMBOLS")
            .map(|s| {
                s.split(',')
                    .map(|code| code.trim().to_ascii_uppercase())
                    .filter(|code| !code.is_empty())
                    .collect()
            })
            .filter(|symbols: &Vec<String>| !symbols.is_empty())
            .unwrap_or(defaults.symbols);
        let base_currency = lookup("PFX_BASE_CURRENCY")
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_currency);
        let seed_mode = match lookup("PFX_SEED_MODE").as_deref().map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("append") => SeedMode::Append,
            _ => SeedMode::Replace,
        };

        Self {
            app_id,
            rates_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            session: SessionConfig {
                symbols,
                base_currency,
                default_balance: defaults.default_balance,
                seed_mode,
            },
        }
    }
}
