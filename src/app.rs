use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

use crate::auth::auth_middleware;
use crate::routes::{accounts, auth, balance, health, transactions, users};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // Everything under the record endpoints requires a bearer token; token
    // issuance, registration and the health check stay open.
    let protected = Router::new()
        .nest("/account", accounts::router())
        .nest("/transaction", transactions::router())
        .nest("/balance", balance::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/token", auth::router())
        .nest("/user", users::router())
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::auth::JwtKeys;

    // No queries run in these tests, so the lazy pool never connects.
    fn test_state() -> AppState {
        AppState {
            pool: PgPoolOptions::new()
                .connect_lazy("postgres://localhost/unused")
                .unwrap(),
            jwt: JwtKeys::from_secret("test-secret"),
        }
    }

    async fn status_of(method: Method, uri: &str) -> StatusCode {
        let app = create_app(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn record_endpoints_require_a_bearer_token() {
        // 401, not 405: every record route is wired and guarded.
        for (method, uri) in [
            (Method::GET, "/account"),
            (Method::GET, "/account/1"),
            (Method::PUT, "/account/1"),
            (Method::DELETE, "/account/1"),
            (Method::GET, "/transaction"),
            (Method::GET, "/balance"),
            (Method::GET, "/balance/account/1"),
        ] {
            assert_eq!(status_of(method, uri).await, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn health_check_is_open() {
        assert_eq!(status_of(Method::GET, "/health").await, StatusCode::OK);
    }
}
