use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{account_queries, transaction_queries};
use crate::errors::AppError;
use crate::models::{CreateTransaction, Transaction, TransactionType};
use crate::services::balance::{self, NewEntry};

/// Creates a transaction against one of the caller's accounts.
///
/// Validation order: transaction type, then account ownership, then amount
/// and note. The balance update and history write run atomically with the
/// insert (see `services::balance`).
pub async fn create(
    pool: &PgPool,
    owner_id: Uuid,
    input: CreateTransaction,
) -> Result<Transaction, AppError> {
    let entry_type = validate_type(&input.transaction_type)?;

    // Scoped lookup: a foreign account reads the same as a missing one.
    let account = account_queries::fetch_one(pool, owner_id, input.account)
        .await?
        .ok_or_else(|| AppError::Validation("Account does not exist".to_string()))?;

    validate_amount(&input.amount)?;
    let note = input.note.unwrap_or_default();
    validate_note(&note)?;

    let posted = balance::post_transaction(
        pool,
        owner_id,
        NewEntry {
            account_number: account.number,
            entry_type,
            amount: &input.amount,
            note: &note,
            date: input.date.unwrap_or_else(chrono::Utc::now),
        },
    )
    .await?;

    tracing::info!(
        "Posted transaction {} - account {} balance now {}",
        posted.transaction.id,
        posted.account.number,
        posted.account.current_balance
    );

    Ok(posted.transaction)
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Transaction>, AppError> {
    transaction_queries::fetch_all_for_owner(pool, owner_id)
        .await
        .map_err(AppError::from)
}

pub async fn get(pool: &PgPool, owner_id: Uuid, id: i64) -> Result<Transaction, AppError> {
    transaction_queries::fetch_one_for_owner(pool, owner_id, id)
        .await?
        .ok_or(AppError::NotFound)
}

pub fn validate_type(raw: &str) -> Result<TransactionType, AppError> {
    raw.parse::<TransactionType>()
        .map_err(|()| AppError::FieldValidation {
            field: "transaction_type",
            message: format!("\"{raw}\" is not a valid choice."),
        })
}

pub fn validate_amount(amount: &BigDecimal) -> Result<(), AppError> {
    if amount < &BigDecimal::from(0) {
        return Err(AppError::FieldValidation {
            field: "amount",
            message: "Amount must not be negative.".to_string(),
        });
    }
    if fraction_digits(amount) > 2 {
        return Err(AppError::FieldValidation {
            field: "amount",
            message: "Ensure that there are no more than 2 decimal places.".to_string(),
        });
    }
    // The column is NUMERIC(10, 2): two fraction digits leave room for
    // eight integer digits, so anything at or past 10^8 cannot be stored.
    if amount >= &BigDecimal::from(100_000_000) {
        return Err(AppError::FieldValidation {
            field: "amount",
            message: "Ensure that there are no more than 10 digits in total.".to_string(),
        });
    }
    Ok(())
}

pub fn validate_note(note: &str) -> Result<(), AppError> {
    if note.chars().count() > 255 {
        return Err(AppError::FieldValidation {
            field: "note",
            message: "Ensure this field has no more than 255 characters.".to_string(),
        });
    }
    Ok(())
}

fn fraction_digits(value: &BigDecimal) -> i64 {
    let (_, exponent) = value.clone().normalized().as_bigint_and_exponent();
    exponent.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn unknown_type_reports_field_level_choice_error() {
        let err = validate_type("invalid").unwrap_err();
        match err {
            AppError::FieldValidation { field, message } => {
                assert_eq!(field, "transaction_type");
                assert_eq!(message, "\"invalid\" is not a valid choice.");
            }
            other => panic!("expected field validation error, got {other:?}"),
        }
    }

    #[test]
    fn the_two_choices_validate() {
        assert_eq!(validate_type("credit").unwrap(), TransactionType::Credit);
        assert_eq!(validate_type("debit").unwrap(), TransactionType::Debit);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let err = validate_amount(&BigDecimal::from_str("-1.00").unwrap()).unwrap_err();
        assert!(matches!(err, AppError::FieldValidation { field: "amount", .. }));
    }

    #[test]
    fn more_than_two_fraction_digits_is_rejected() {
        assert!(validate_amount(&BigDecimal::from_str("1.999").unwrap()).is_err());
        assert!(validate_amount(&BigDecimal::from_str("1.99").unwrap()).is_ok());
        assert!(validate_amount(&BigDecimal::from_str("1").unwrap()).is_ok());
        // Trailing zeros do not count as extra precision.
        assert!(validate_amount(&BigDecimal::from_str("1.990").unwrap()).is_ok());
    }

    #[test]
    fn more_than_ten_total_digits_is_rejected() {
        assert!(validate_amount(&BigDecimal::from_str("99999999.99").unwrap()).is_ok());
        let err = validate_amount(&BigDecimal::from_str("100000000.00").unwrap()).unwrap_err();
        match err {
            AppError::FieldValidation { field, message } => {
                assert_eq!(field, "amount");
                assert_eq!(message, "Ensure that there are no more than 10 digits in total.");
            }
            other => panic!("expected field validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(validate_amount(&BigDecimal::from(0)).is_ok());
    }

    #[test]
    fn note_limit_is_255_characters() {
        assert!(validate_note(&"x".repeat(255)).is_ok());
        assert!(validate_note(&"x".repeat(256)).is_err());
        assert!(validate_note("").is_ok());
    }
}
