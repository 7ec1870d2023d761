use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Transaction;

pub struct NewTransactionRow<'a> {
    pub entry_type: &'a str,
    pub note: &'a str,
    pub amount: &'a BigDecimal,
    pub date: chrono::DateTime<chrono::Utc>,
    pub account_number: i64,
}

pub async fn create(
    conn: &mut PgConnection,
    row: NewTransactionRow<'_>,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (entry_type, note, amount, date, account_number)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, entry_type, note, amount, date, account_number, created_at, updated_at",
    )
    .bind(row.entry_type)
    .bind(row.note)
    .bind(row.amount)
    .bind(row.date)
    .bind(row.account_number)
    .fetch_one(conn)
    .await
}

pub async fn fetch_all_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT t.id, t.entry_type, t.note, t.amount, t.date, t.account_number,
                t.created_at, t.updated_at
         FROM transactions t
         JOIN accounts a ON a.number = t.account_number
         WHERE a.owner_id = $1
         ORDER BY t.id ASC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
    id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT t.id, t.entry_type, t.note, t.amount, t.date, t.account_number,
                t.created_at, t.updated_at
         FROM transactions t
         JOIN accounts a ON a.number = t.account_number
         WHERE a.owner_id = $1 AND t.id = $2",
    )
    .bind(owner_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}
