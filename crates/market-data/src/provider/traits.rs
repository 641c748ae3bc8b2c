//! Exchange-rate provider trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::RateError;

/// Trait for exchange-rate providers.
///
/// Implement this trait to add support for a new rate source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use rust_decimal::Decimal;
/// use capex_market_data::{ExchangeRateProvider, RateError};
///
/// struct FixedRates;
///
/// #[async_trait]
/// impl ExchangeRateProvider for FixedRates {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, RateError> {
///         Ok(Decimal::ONE)
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the multiplier that converts one unit of `from` into `to`.
    ///
    /// Each call performs one outbound request; results are not cached.
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, RateError>;
}
