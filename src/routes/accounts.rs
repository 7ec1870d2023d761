use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::AccountResponse;
use crate::services::account_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/:number",
            get(get_account).put(update_account).delete(delete_account),
        )
}

pub async fn create_account(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    info!("POST /account - Creating account for user {}", owner_id);

    let account = account_service::create(&state.pool, owner_id)
        .await
        .map_err(|e| {
            error!("Failed to create account for user {}: {}", owner_id, e);
            e
        })?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    info!("GET /account - Listing accounts for user {}", owner_id);

    let accounts = account_service::list(&state.pool, owner_id)
        .await
        .map_err(|e| {
            error!("Failed to list accounts for user {}: {}", owner_id, e);
            e
        })?;

    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

pub async fn get_account(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(number): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    info!("GET /account/{} - Fetching account", number);

    let account = account_service::get(&state.pool, owner_id, number).await?;
    Ok(Json(AccountResponse::from(&account)))
}

pub async fn update_account(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(number): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    info!("PUT /account/{} - Updating account", number);

    let account = account_service::update(&state.pool, owner_id, number).await?;
    Ok(Json(AccountResponse::from(&account)))
}

pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(number): Path<i64>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /account/{} - Deleting account", number);

    account_service::delete(&state.pool, owner_id, number).await?;
    Ok(StatusCode::NO_CONTENT)
}
