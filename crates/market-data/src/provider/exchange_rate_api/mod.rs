//! ExchangeRate-API provider.
//!
//! Fetches the latest rate table for a base currency from
//! `GET {base_url}/{api_key}/latest/{from}` and selects the target entry.
//!
//! The response body looks like:
//!
//! ```json
//! { "result": "success", "base_code": "USD", "conversion_rates": { "EUR": 0.9, ... } }
//! ```
//!
//! On failure the provider answers `{ "result": "error", "error-type": "..." }`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::RateError;
use crate::provider::ExchangeRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "EXCHANGE_RATE_API";

/// Result flag the provider sets on a successful lookup
const RESULT_SUCCESS: &str = "success";

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Latest-rates response body.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

/// HTTP client for ExchangeRate-API compatible providers.
///
/// # Example
///
/// ```ignore
/// use capex_market_data::ExchangeRateApiProvider;
///
/// let provider = ExchangeRateApiProvider::new("https://v6.exchangerate-api.com/v6", "key");
/// let rate = provider.get_exchange_rate("USD", "EUR").await?;
/// ```
pub struct ExchangeRateApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    /// Create a provider with the default request timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider whose outbound calls give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn latest_url(&self, from: &str) -> String {
        format!(
            "{}/{}/latest/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            from
        )
    }
}

/// Pick the `to` entry out of a decoded rate table.
fn select_rate(body: LatestRatesResponse, from: &str, to: &str) -> Result<Decimal, RateError> {
    if body.result != RESULT_SUCCESS {
        log::warn!(
            "{} rejected {} -> {} lookup: {}",
            PROVIDER_ID,
            from,
            to,
            body.error_type.as_deref().unwrap_or("unknown error")
        );
        return Err(RateError::provider(
            PROVIDER_ID,
            "Failed to fetch exchange rate",
        ));
    }

    // A zero rate is as useless as a missing one.
    let rate = body
        .conversion_rates
        .get(to)
        .copied()
        .filter(|rate| *rate != 0.0)
        .ok_or_else(|| RateError::RateNotFound(to.to_string()))?;

    Decimal::try_from(rate)
        .map_err(|e| RateError::provider(PROVIDER_ID, format!("Invalid rate for {}: {}", to, e)))
}

#[async_trait]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, RateError> {
        log::debug!("Fetching {} -> {} rate from {}", from, to, PROVIDER_ID);

        let response = self.client.get(self.latest_url(from)).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RateError::CurrencyNotSupported(from.to_string()));
        }
        if !status.is_success() {
            return Err(RateError::provider(
                PROVIDER_ID,
                format!("Unexpected HTTP status {}", status),
            ));
        }

        let body: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| RateError::provider(PROVIDER_ID, e.to_string()))?;

        select_rate(body, from, to)
    }
}
