//! FX (Foreign Exchange) module - conversion service and traits.

mod fx_errors;
mod fx_service;
mod fx_traits;

pub use fx_errors::FxError;
pub use fx_service::{round_amount, FxService};
pub use fx_traits::FxServiceTrait;
