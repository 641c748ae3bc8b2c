use super::fx_errors::FxError;
use super::fx_traits::FxServiceTrait;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use async_trait::async_trait;
use capex_market_data::ExchangeRateProvider;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

/// Rounds an amount to display precision, midpoints away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[derive(Clone)]
pub struct FxService {
    provider: Arc<dyn ExchangeRateProvider>,
}

impl FxService {
    pub fn new(provider: Arc<dyn ExchangeRateProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        self.provider
            .get_exchange_rate(from_currency, to_currency)
            .await
            .map_err(|e| {
                log::warn!(
                    "Rate lookup {} -> {} via {} failed: {}",
                    from_currency,
                    to_currency,
                    self.provider.id(),
                    e
                );
                FxError::from(e).into()
            })
    }

    async fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal> {
        if from_currency == to_currency {
            return Ok(amount);
        }

        let rate = self.get_exchange_rate(from_currency, to_currency).await?;
        amount.checked_mul(rate).ok_or_else(|| {
            log::warn!(
                "Converting {} {} -> {} at {} overflowed",
                amount,
                from_currency,
                to_currency,
                rate
            );
            FxError::AmountOutOfRange(amount.to_string()).into()
        })
    }
}
