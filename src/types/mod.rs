//! Types module
//!
//! Contains core data structures used throughout the application.
//! - `account`: Account and its kinds
//! - `user`: Users loaded from the user information file
//! - `error`: Error types for the terminal

pub mod account;
pub mod error;
pub mod user;

pub use account::{Account, AccountKind};
pub use error::BankError;
pub use user::User;

use rust_decimal::Decimal;

/// Render an amount the way balances appear in the data files
///
/// Trailing zeros are dropped but at least one fractional digit is kept,
/// so `125.00` renders as `125.0` and `10.25` stays `10.25`.
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(12500, 2), "125.0")]
    #[case(Decimal::new(50, 0), "50.0")]
    #[case(Decimal::new(1025, 2), "10.25")]
    #[case(Decimal::new(1050, 2), "10.5")]
    #[case(Decimal::new(-2500, 2), "-25.0")]
    #[case(Decimal::ZERO, "0.0")]
    #[case(Decimal::new(123456, 4), "12.3456")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }
}
