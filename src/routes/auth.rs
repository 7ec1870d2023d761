use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::services::user_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(obtain_token))
        .route("/refresh", post(refresh_token))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access: String,
}

pub async fn obtain_token(
    State(state): State<AppState>,
    Json(data): Json<TokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    info!("POST /api/token - Issuing token pair for {}", data.username);

    let user = user_service::authenticate(&state.pool, &data.username, &data.password).await?;

    Ok(Json(TokenPair {
        access: state.jwt.issue_access_token(user.id)?,
        refresh: state.jwt.issue_refresh_token(user.id)?,
    }))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(data): Json<RefreshRequest>,
) -> Result<Json<AccessToken>, AppError> {
    info!("POST /api/token/refresh - Refreshing access token");

    let claims = state.jwt.verify_refresh_token(&data.refresh)?;

    Ok(Json(AccessToken {
        access: state.jwt.issue_access_token(claims.sub)?,
    }))
}
