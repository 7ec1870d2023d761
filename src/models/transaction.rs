use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(()),
        }
    }
}

// A single credit or debit posted against an account. The balance effect is
// applied exactly once, when the row is created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub entry_type: String, // Converted to/from TransactionType
    pub note: String,
    pub amount: BigDecimal,
    pub date: chrono::DateTime<chrono::Utc>,
    pub account_number: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransaction {
    pub account: i64,
    pub amount: BigDecimal,
    // Kept as a raw string so an unknown value can be reported as a
    // field-level choice error instead of a deserialization failure.
    pub transaction_type: String,
    pub note: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub date: chrono::DateTime<chrono::Utc>,
    pub transaction_type: String,
    pub note: String,
    pub amount: String,
    pub account_id: i64,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            date: transaction.date,
            transaction_type: transaction.entry_type.clone(),
            note: transaction.note.clone(),
            amount: format_money(&transaction.amount),
            account_id: transaction.account_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_parses_the_two_choices() {
        assert_eq!("credit".parse(), Ok(TransactionType::Credit));
        assert_eq!("debit".parse(), Ok(TransactionType::Debit));
        assert!("invalid".parse::<TransactionType>().is_err());
        assert!("Credit".parse::<TransactionType>().is_err());
    }

    #[test]
    fn response_carries_two_decimal_amount() {
        let transaction = Transaction {
            id: 1,
            entry_type: "credit".to_string(),
            note: "Test transaction".to_string(),
            amount: BigDecimal::from(100),
            date: chrono::Utc::now(),
            account_number: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let response = TransactionResponse::from(&transaction);
        assert_eq!(response.amount, "100.00");
        assert_eq!(response.transaction_type, "credit");
        assert_eq!(response.account_id, 1);
    }
}
