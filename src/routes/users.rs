use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CreateUser, UserResponse};
use crate::services::user_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register_user))
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    info!("POST /user - Registering user {}", data.username);

    let user = user_service::register(&state.pool, data).await.map_err(|e| {
        error!("Failed to register user: {}", e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
