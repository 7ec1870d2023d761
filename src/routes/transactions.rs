use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{CreateTransaction, TransactionResponse};
use crate::services::transaction_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/:id", get(get_transaction))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Json(data): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    info!(
        "POST /transaction - Posting {} of {} to account {}",
        data.transaction_type, data.amount, data.account
    );

    let transaction = transaction_service::create(&state.pool, owner_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create transaction for user {}: {}", owner_id, e);
            e
        })?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(&transaction)),
    ))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    info!("GET /transaction - Listing transactions for user {}", owner_id);

    let transactions = transaction_service::list(&state.pool, owner_id)
        .await
        .map_err(|e| {
            error!("Failed to list transactions for user {}: {}", owner_id, e);
            e
        })?;

    Ok(Json(
        transactions.iter().map(TransactionResponse::from).collect(),
    ))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<TransactionResponse>, AppError> {
    info!("GET /transaction/{} - Fetching transaction", id);

    let transaction = transaction_service::get(&state.pool, owner_id, id).await?;
    Ok(Json(TransactionResponse::from(&transaction)))
}
