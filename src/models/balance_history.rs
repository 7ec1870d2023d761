use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format_money;

// Daily balance snapshot. At most one row per account per calendar day; the
// current day's row is overwritten in place as further transactions post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BalanceHistory {
    pub id: i64,
    pub account_number: i64,
    pub balance: BigDecimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceHistoryResponse {
    pub date: String,
    pub balance: String,
    pub account_id: i64,
}

impl From<&BalanceHistory> for BalanceHistoryResponse {
    fn from(row: &BalanceHistory) -> Self {
        Self {
            date: row.created_at.format("%Y-%m-%d").to_string(),
            balance: format_money(&row.balance),
            account_id: row.account_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn response_renders_calendar_date_and_balance() {
        let row = BalanceHistory {
            id: 1,
            account_number: 3,
            balance: BigDecimal::from(100),
            created_at: chrono::Utc.with_ymd_and_hms(2020, 1, 2, 12, 30, 0).unwrap(),
            updated_at: chrono::Utc.with_ymd_and_hms(2020, 1, 2, 12, 30, 0).unwrap(),
        };
        let response = BalanceHistoryResponse::from(&row);
        assert_eq!(response.date, "2020-01-02");
        assert_eq!(response.balance, "100.00");
        assert_eq!(response.account_id, 3);
    }
}
