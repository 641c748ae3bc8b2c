//! Error types for rate lookups.

use thiserror::Error;

/// Errors that can occur while looking up an exchange rate.
#[derive(Error, Debug)]
pub enum RateError {
    /// The provider answered successfully but its table has no entry for the
    /// target currency.
    #[error("Rate not found for {0}")]
    RateNotFound(String),

    /// The provider answered with a not-found status for the base currency.
    #[error("Currency not supported: {0}")]
    CurrencyNotSupported(String),

    /// Any other provider-side failure: non-success result flag, unexpected
    /// HTTP status or a body that could not be decoded.
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RateError {
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
