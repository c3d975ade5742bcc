use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Starting balance used when an account has none recorded
pub const DEFAULT_INITIAL_BALANCE: Decimal = dec!(10000);

/// Decimal places kept on balance-relative percentages
pub const PERCENTAGE_DECIMAL_PRECISION: u32 = 4;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default currency for new accounts
pub const DEFAULT_CURRENCY: &str = "USD";
