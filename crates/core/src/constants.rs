use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balance given to every account created from a rate snapshot
pub const DEFAULT_ACCOUNT_BALANCE: Decimal = dec!(100);

/// Currency used when an account is created without one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Base currency requested from the rates provider
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Currencies requested from the rates provider on init
pub const DEFAULT_SYMBOLS: [&str; 4] = ["USD", "EUR", "GBP", "UAH"];

/// Decimal precision for balances, conversions and display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
