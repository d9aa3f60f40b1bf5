//! Decimal type utilities for precise monetary calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Monetary amount with arbitrary scale
///
/// Balances and transfer amounts are compared and combined at full precision;
/// nothing in the transfer path rounds.
pub type Amount = Decimal;
