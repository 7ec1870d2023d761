//! Bearer-token authentication: JWT issuance/validation, password hashing,
//! the axum middleware guarding record endpoints and the `AuthUser`
//! extractor handlers use to read the caller's identity.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const ACCESS_TOKEN_MINUTES: i64 = 15;
const REFRESH_TOKEN_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    // "access" or "refresh"; a refresh token cannot be used as a bearer
    // credential and vice versa.
    pub token_use: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, "access", Duration::minutes(ACCESS_TOKEN_MINUTES))
    }

    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, "refresh", Duration::days(REFRESH_TOKEN_DAYS))
    }

    fn issue(&self, user_id: Uuid, token_use: &str, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            token_use: token_use.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to encode token: {e}")))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, "access")
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, "refresh")
    }

    fn verify(&self, token: &str, expected_use: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized)?;
        if data.claims.token_use != expected_use {
            return Err(AppError::Unauthorized);
        }
        Ok(data.claims)
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Validates the bearer token and stores the caller's user id in request
/// extensions for `AuthUser` to pick up. Rejects with 401 otherwise.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(token) = header.and_then(extract_bearer_token) else {
        return AppError::Unauthorized.into_response();
    };

    match state.jwt.verify_access_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser(claims.sub));
            next.run(request).await
        }
        Err(_) => AppError::Unauthorized.into_response(),
    }
}

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_round_trips() {
        let keys = JwtKeys::from_secret("test-secret");
        let user_id = Uuid::new_v4();
        let token = keys.issue_access_token(user_id).unwrap();
        let claims = keys.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_use, "access");
    }

    #[test]
    fn refresh_token_is_not_a_valid_bearer_credential() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = keys.issue_refresh_token(Uuid::new_v4()).unwrap();
        assert!(keys.verify_access_token(&token).is_err());
        assert!(keys.verify_refresh_token(&token).is_ok());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let keys = JwtKeys::from_secret("test-secret");
        let other = JwtKeys::from_secret("other-secret");
        let token = other.issue_access_token(Uuid::new_v4()).unwrap();
        assert!(keys.verify_access_token(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Token abc"), None);
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("Test123!").unwrap();
        assert!(verify_password("Test123!", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("Test123!", "not-a-hash"));
    }
}
