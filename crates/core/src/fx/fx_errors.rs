use capex_market_data::RateError;
use thiserror::Error;

/// Errors raised while converting an amount between currencies.
#[derive(Error, Debug)]
pub enum FxError {
    /// The rate lookup failed; the original message is kept.
    #[error("Currency conversion failed: {0}")]
    ConversionFailed(#[from] RateError),

    /// The amount, or its product with the rate, does not fit a `Decimal`.
    #[error("Currency conversion failed: amount {0} is out of range")]
    AmountOutOfRange(String),
}
