use sqlx::PgPool;

use crate::auth;
use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::{CreateUser, User};

pub async fn register(pool: &PgPool, input: CreateUser) -> Result<User, AppError> {
    if input.username.trim().is_empty() {
        return Err(AppError::FieldValidation {
            field: "username",
            message: "This field may not be blank.".to_string(),
        });
    }
    if input.password.is_empty() {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "This field may not be blank.".to_string(),
        });
    }

    let password_hash = auth::hash_password(&input.password)?;

    match user_queries::create(pool, input.username.trim(), &input.email, &password_hash).await {
        Ok(user) => Ok(user),
        Err(e) => {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                return Err(AppError::FieldValidation {
                    field: "username",
                    message: "A user with that username already exists.".to_string(),
                });
            }
            Err(AppError::Db(e))
        }
    }
}

/// Resolves a username/password pair to the stored user, uniformly failing
/// Unauthorized whether the user is missing or the password is wrong.
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !auth::verify_password(password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    Ok(user)
}
