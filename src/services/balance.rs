//! Balance maintenance: the bookkeeping rule that keeps an account's
//! `current_balance` and its daily history series consistent as
//! transactions post.
//!
//! The rule runs as explicit calls, never as a side effect of persistence:
//! posting a transaction, applying the balance delta and writing the history
//! row happen inside one database transaction, with the account row locked
//! so concurrent posts against the same account serialize.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::transaction_queries::NewTransactionRow;
use crate::db::{account_queries, balance_history_queries, transaction_queries};
use crate::errors::AppError;
use crate::models::{Account, BalanceHistory, Transaction, TransactionType};

/// The signed effect of a transaction on an account balance:
/// credits add, debits subtract.
pub fn signed_delta(entry_type: TransactionType, amount: &BigDecimal) -> BigDecimal {
    match entry_type {
        TransactionType::Credit => amount.clone(),
        TransactionType::Debit => -amount.clone(),
    }
}

/// What the maintainer should do to the history series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// No row yet, or the latest row is from a previous day: start a new row.
    Insert,
    /// The latest row is from today: overwrite its balance in place.
    Overwrite(i64),
}

/// Decides between appending a new daily row and overwriting today's row.
/// Calendar days, not timestamps: two posts on the same day share one row.
pub fn history_action(latest: Option<&BalanceHistory>, today: NaiveDate) -> HistoryAction {
    match latest {
        Some(row) if row.created_at.date_naive() == today => HistoryAction::Overwrite(row.id),
        _ => HistoryAction::Insert,
    }
}

#[derive(Debug)]
pub struct PostedTransaction {
    pub transaction: Transaction,
    pub account: Account,
}

pub struct NewEntry<'a> {
    pub account_number: i64,
    pub entry_type: TransactionType,
    pub amount: &'a BigDecimal,
    pub note: &'a str,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// Posts a transaction and applies its balance effect atomically.
///
/// All three writes (transaction row, account balance, history row) commit
/// together or not at all. The account row is re-read `FOR UPDATE` so a
/// concurrent post against the same account waits for this one.
pub async fn post_transaction(
    pool: &PgPool,
    owner_id: Uuid,
    entry: NewEntry<'_>,
) -> Result<PostedTransaction, AppError> {
    let mut tx = pool.begin().await?;

    let account = account_queries::lock_for_posting(&mut *tx, owner_id, entry.account_number)
        .await?
        .ok_or_else(|| AppError::Validation("Account does not exist".to_string()))?;

    let transaction = transaction_queries::create(
        &mut *tx,
        NewTransactionRow {
            entry_type: entry.entry_type.as_str(),
            note: entry.note,
            amount: entry.amount,
            date: entry.date,
            account_number: account.number,
        },
    )
    .await?;

    let new_balance =
        (&account.current_balance + signed_delta(entry.entry_type, entry.amount)).with_scale(2);
    let account = account_queries::set_balance(&mut *tx, account.number, &new_balance).await?;

    maintain_history(&mut *tx, &account).await?;

    tx.commit().await?;

    Ok(PostedTransaction {
        transaction,
        account,
    })
}

/// Applies the daily-history rule after an account balance change.
///
/// The day comparison uses the account's update timestamp against the
/// latest row's creation timestamp, so the series holds the last-known
/// balance for every day that had activity.
pub async fn maintain_history(
    conn: &mut PgConnection,
    account: &Account,
) -> Result<BalanceHistory, AppError> {
    let latest = balance_history_queries::fetch_latest(conn, account.number).await?;

    let row = match history_action(latest.as_ref(), account.updated_at.date_naive()) {
        HistoryAction::Insert => {
            balance_history_queries::create(conn, account.number, &account.current_balance).await?
        }
        HistoryAction::Overwrite(id) => {
            balance_history_queries::set_balance(conn, id, &account.current_balance).await?
        }
    };

    Ok(row)
}
