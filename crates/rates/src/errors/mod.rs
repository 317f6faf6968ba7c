//! Error types for the rates crate.

use thiserror::Error;

/// Errors that can occur while fetching a rate snapshot.
#[derive(Error, Debug)]
pub enum RatesError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider cannot quote rates against the requested base currency.
    #[error("Unsupported base currency: {0}")]
    UnsupportedBase(String),

    /// The provider returned a snapshot that failed validation.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RatesError {
    /// Builds a [`RatesError::ProviderError`] for the given provider.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        RatesError::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Returns true for failures that may succeed if the caller tries again later.
    ///
    /// Nothing in pocketfx retries automatically; callers surface this to the user.
    pub fn is_transient(&self) -> bool {
        match self {
            RatesError::RateLimited { .. } | RatesError::Timeout { .. } => true,
            RatesError::Network(err) => err.is_timeout() || err.is_connect(),
            RatesError::ProviderError { .. }
            | RatesError::UnsupportedBase(_)
            | RatesError::ValidationFailed { .. } => false,
        }
    }
}
