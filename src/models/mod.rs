mod account;
mod balance_history;
mod transaction;
mod user;

pub use account::{format_account_number, Account, AccountResponse};
pub use balance_history::{BalanceHistory, BalanceHistoryResponse};
pub use transaction::{CreateTransaction, Transaction, TransactionResponse, TransactionType};
pub use user::{CreateUser, User, UserResponse};

use bigdecimal::BigDecimal;

/// Renders a monetary value with exactly two fraction digits, the shape
/// every response uses for balances and amounts.
pub fn format_money(value: &BigDecimal) -> String {
    value.with_scale(2).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_always_shows_two_fraction_digits() {
        assert_eq!(format_money(&BigDecimal::from(0)), "0.00");
        assert_eq!(format_money(&BigDecimal::from_str("100.5").unwrap()), "100.50");
        assert_eq!(format_money(&BigDecimal::from_str("-42.1").unwrap()), "-42.10");
    }
}
