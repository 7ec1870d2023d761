use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::BalanceHistoryResponse;
use crate::services::balance_history_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_history))
        .route("/account/:account_id", get(list_account_history))
        .route("/account/:account_id/:date", get(get_account_history_on_date))
}

pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<BalanceHistoryResponse>>, AppError> {
    info!("GET /balance - Listing balance history for user {}", owner_id);

    let rows = balance_history_service::list(&state.pool, owner_id)
        .await
        .map_err(|e| {
            error!("Failed to list balance history for user {}: {}", owner_id, e);
            e
        })?;

    Ok(Json(rows.iter().map(BalanceHistoryResponse::from).collect()))
}

pub async fn list_account_history(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<BalanceHistoryResponse>>, AppError> {
    info!("GET /balance/account/{} - Listing account history", account_id);

    let rows = balance_history_service::list_for_account(&state.pool, owner_id, account_id)
        .await
        .map_err(|e| {
            error!("Failed to list history for account {}: {}", account_id, e);
            e
        })?;

    Ok(Json(rows.iter().map(BalanceHistoryResponse::from).collect()))
}

pub async fn get_account_history_on_date(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path((account_id, date)): Path<(i64, NaiveDate)>,
) -> Result<Json<BalanceHistoryResponse>, AppError> {
    info!(
        "GET /balance/account/{}/{} - Fetching balance on date",
        account_id, date
    );

    let row =
        balance_history_service::get_for_account_on_date(&state.pool, owner_id, account_id, date)
            .await?;

    Ok(Json(BalanceHistoryResponse::from(&row)))
}
