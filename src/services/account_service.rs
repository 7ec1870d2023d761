use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{account_queries, balance_history_queries};
use crate::errors::AppError;
use crate::models::Account;

/// Creates an account for the caller with a zero balance. The opening
/// history row (balance 0.00) is written in the same database transaction.
pub async fn create(pool: &PgPool, owner_id: Uuid) -> Result<Account, AppError> {
    let mut tx = pool.begin().await?;

    let account = account_queries::create(&mut *tx, owner_id).await?;
    balance_history_queries::create(&mut *tx, account.number, &account.current_balance).await?;

    tx.commit().await?;
    Ok(account)
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Account>, AppError> {
    account_queries::fetch_all(pool, owner_id)
        .await
        .map_err(AppError::from)
}

// Ownership is enforced by scoping the lookup: a number owned by someone
// else and a number that does not exist are both NotFound.
pub async fn get(pool: &PgPool, owner_id: Uuid, number: i64) -> Result<Account, AppError> {
    account_queries::fetch_one(pool, owner_id, number)
        .await?
        .ok_or(AppError::NotFound)
}

// Every wire field of an account is read-only, so update is a scoped
// lookup that echoes the current state.
pub async fn update(pool: &PgPool, owner_id: Uuid, number: i64) -> Result<Account, AppError> {
    get(pool, owner_id, number).await
}

pub async fn delete(pool: &PgPool, owner_id: Uuid, number: i64) -> Result<(), AppError> {
    match account_queries::delete(pool, owner_id, number).await? {
        0 => Err(AppError::NotFound),
        _ => Ok(()),
    }
}
