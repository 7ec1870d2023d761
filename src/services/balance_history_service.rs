use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{account_queries, balance_history_queries};
use crate::errors::AppError;
use crate::models::BalanceHistory;

/// All history rows across the caller's accounts, newest first.
pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<BalanceHistory>, AppError> {
    balance_history_queries::fetch_all_for_owner(pool, owner_id)
        .await
        .map_err(AppError::from)
}

pub async fn list_for_account(
    pool: &PgPool,
    owner_id: Uuid,
    account_number: i64,
) -> Result<Vec<BalanceHistory>, AppError> {
    let account = resolve_account(pool, owner_id, account_number).await?;
    balance_history_queries::fetch_for_account(pool, account)
        .await
        .map_err(AppError::from)
}

/// The balance the account had on the given date: the most recent row
/// created on or before the end of that day.
pub async fn get_for_account_on_date(
    pool: &PgPool,
    owner_id: Uuid,
    account_number: i64,
    date: NaiveDate,
) -> Result<BalanceHistory, AppError> {
    let account = resolve_account(pool, owner_id, account_number).await?;
    balance_history_queries::fetch_on_or_before(pool, account, end_of_day(date))
        .await?
        .ok_or_else(|| {
            AppError::Validation("No balance history found for this date".to_string())
        })
}

async fn resolve_account(
    pool: &PgPool,
    owner_id: Uuid,
    account_number: i64,
) -> Result<i64, AppError> {
    account_queries::fetch_one(pool, owner_id, account_number)
        .await?
        .map(|account| account.number)
        .ok_or_else(|| AppError::Validation("Account does not exist".to_string()))
}

/// 23:59:59 on the given date, the inclusive cutoff for by-date lookups.
pub fn end_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    let wall_clock = date.and_hms_opt(23, 59, 59).expect("valid wall-clock time");
    Utc.from_utc_datetime(&wall_clock)
}
