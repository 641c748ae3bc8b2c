/// Currency in which project budgets are stored
pub const BASE_CURRENCY: &str = "USD";

/// Target currency of the fixed TTD conversion route
pub const TTD_CURRENCY: &str = "TTD";

/// Decimal places kept on amounts attached to responses
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Earliest budget year accepted for a project
pub const MIN_PROJECT_YEAR: i64 = 2000;

/// Length of an ISO 4217 currency code
pub const CURRENCY_CODE_LENGTH: usize = 3;

/// Storage format of `createdAt` / `updatedAt`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
