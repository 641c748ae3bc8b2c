use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Multiplier converting one unit of `from_currency` into `to_currency`.
    async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal>;

    /// Converts `amount` at full precision. Identical currencies short-circuit
    /// without a rate lookup.
    async fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal>;
}
