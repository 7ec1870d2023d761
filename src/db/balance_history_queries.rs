use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::BalanceHistory;

pub async fn create(
    conn: &mut PgConnection,
    account_number: i64,
    balance: &BigDecimal,
) -> Result<BalanceHistory, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "INSERT INTO balance_history (account_number, balance)
         VALUES ($1, $2)
         RETURNING id, account_number, balance, created_at, updated_at",
    )
    .bind(account_number)
    .bind(balance)
    .fetch_one(conn)
    .await
}

pub async fn set_balance(
    conn: &mut PgConnection,
    id: i64,
    balance: &BigDecimal,
) -> Result<BalanceHistory, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "UPDATE balance_history
         SET balance = $2, updated_at = NOW()
         WHERE id = $1
         RETURNING id, account_number, balance, created_at, updated_at",
    )
    .bind(id)
    .bind(balance)
    .fetch_one(conn)
    .await
}

// The newest row for an account, i.e. the one the maintainer overwrites
// while the calendar day has not rolled over.
pub async fn fetch_latest(
    conn: &mut PgConnection,
    account_number: i64,
) -> Result<Option<BalanceHistory>, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "SELECT id, account_number, balance, created_at, updated_at
         FROM balance_history
         WHERE account_number = $1
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(account_number)
    .fetch_optional(conn)
    .await
}

pub async fn fetch_all_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<BalanceHistory>, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "SELECT h.id, h.account_number, h.balance, h.created_at, h.updated_at
         FROM balance_history h
         JOIN accounts a ON a.number = h.account_number
         WHERE a.owner_id = $1
         ORDER BY h.created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_for_account(
    pool: &PgPool,
    account_number: i64,
) -> Result<Vec<BalanceHistory>, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "SELECT id, account_number, balance, created_at, updated_at
         FROM balance_history
         WHERE account_number = $1
         ORDER BY created_at DESC",
    )
    .bind(account_number)
    .fetch_all(pool)
    .await
}

pub async fn fetch_on_or_before(
    pool: &PgPool,
    account_number: i64,
    cutoff: chrono::DateTime<chrono::Utc>,
) -> Result<Option<BalanceHistory>, sqlx::Error> {
    sqlx::query_as::<_, BalanceHistory>(
        "SELECT id, account_number, balance, created_at, updated_at
         FROM balance_history
         WHERE account_number = $1 AND created_at <= $2
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(account_number)
    .bind(cutoff)
    .fetch_optional(pool)
    .await
}
