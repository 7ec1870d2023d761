use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Validation error on {field}: {message}")]
    FieldValidation {
        field: &'static str,
        message: String,
    },
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            // Non-field errors render as a bare list, field errors as a
            // {field: [messages]} map.
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!([msg]))).into_response()
            }
            AppError::FieldValidation { field, message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ field: [message] }))).into_response()
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            AppError::Db(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Db(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn non_field_validation_renders_as_a_bare_list() {
        assert_eq!(
            body_json(AppError::Validation("Account does not exist".into())).await,
            json!(["Account does not exist"])
        );
        assert_eq!(
            body_json(AppError::Validation(
                "No balance history found for this date".into()
            ))
            .await,
            json!(["No balance history found for this date"])
        );
    }

    #[tokio::test]
    async fn field_validation_renders_as_a_field_to_messages_map() {
        let err = AppError::FieldValidation {
            field: "transaction_type",
            message: "\"invalid\" is not a valid choice.".into(),
        };
        assert_eq!(
            body_json(err).await,
            json!({ "transaction_type": ["\"invalid\" is not a valid choice."] })
        );
    }

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("Account does not exist".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FieldValidation {
                field: "transaction_type",
                message: "\"x\" is not a valid choice.".into()
            }
            .into_response()
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(sqlx::Error::RowNotFound).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
