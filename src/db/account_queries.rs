use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Account;

pub async fn create(conn: &mut PgConnection, owner_id: Uuid) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (owner_id)
         VALUES ($1)
         RETURNING number, current_balance, owner_id, created_at, updated_at",
    )
    .bind(owner_id)
    .fetch_one(conn)
    .await
}

pub async fn fetch_all(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT number, current_balance, owner_id, created_at, updated_at
         FROM accounts
         WHERE owner_id = $1
         ORDER BY number ASC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    pool: &PgPool,
    owner_id: Uuid,
    number: i64,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT number, current_balance, owner_id, created_at, updated_at
         FROM accounts
         WHERE owner_id = $1 AND number = $2",
    )
    .bind(owner_id)
    .bind(number)
    .fetch_optional(pool)
    .await
}

// Row-locked read used while posting a transaction. Serializes concurrent
// posts against the same account; other accounts are unaffected.
pub async fn lock_for_posting(
    conn: &mut PgConnection,
    owner_id: Uuid,
    number: i64,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT number, current_balance, owner_id, created_at, updated_at
         FROM accounts
         WHERE owner_id = $1 AND number = $2
         FOR UPDATE",
    )
    .bind(owner_id)
    .bind(number)
    .fetch_optional(conn)
    .await
}

pub async fn set_balance(
    conn: &mut PgConnection,
    number: i64,
    balance: &BigDecimal,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts
         SET current_balance = $2, updated_at = NOW()
         WHERE number = $1
         RETURNING number, current_balance, owner_id, created_at, updated_at",
    )
    .bind(number)
    .bind(balance)
    .fetch_one(conn)
    .await
}

pub async fn delete(pool: &PgPool, owner_id: Uuid, number: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE owner_id = $1 AND number = $2")
        .bind(owner_id)
        .bind(number)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
