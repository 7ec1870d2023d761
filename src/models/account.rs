use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::format_money;

// A single holder's running balance. The number doubles as the primary key
// and the visible account number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub number: i64,
    pub current_balance: BigDecimal,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub account_number: String,
    pub current_balance: String,
    pub user_id: Uuid,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.number,
            account_number: format_account_number(account.number),
            current_balance: format_money(&account.current_balance),
            user_id: account.owner_id,
        }
    }
}

/// Renders an account number as four groups of four digits,
/// zero-padded to 16 digits, e.g. "0000 0000 0000 0042".
pub fn format_account_number(number: i64) -> String {
    let padded = format!("{:016}", number);
    format!(
        "{} {} {} {}",
        &padded[..4],
        &padded[4..8],
        &padded[8..12],
        &padded[12..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn account_number_is_grouped_and_zero_padded() {
        assert_eq!(format_account_number(1), "0000 0000 0000 0001");
        assert_eq!(format_account_number(1234), "0000 0000 0000 1234");
        assert_eq!(format_account_number(123456789), "0000 0001 2345 6789");
    }

    #[test]
    fn response_formats_balance_with_two_decimals() {
        let account = Account {
            number: 7,
            current_balance: BigDecimal::from_str("100").unwrap(),
            owner_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let response = AccountResponse::from(&account);
        assert_eq!(response.id, 7);
        assert_eq!(response.account_number, "0000 0000 0000 0007");
        assert_eq!(response.current_balance, "100.00");
    }
}
