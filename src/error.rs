use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::accounts::password::PasswordError;
use crate::accounts::session::SessionError;

/// Which credential check failed. Kept distinct for logs; callers only ever
/// see one combined 401 body.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email not found")]
    EmailNotFound,
    #[error("wrong password")]
    WrongPassword,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Hash(#[from] PasswordError),
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Auth(_) => (
                StatusCode::UNAUTHORIZED,
                "invalid credentials".to_string(),
            ),
            ApiError::Session(SessionError::Sign(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "session signing failed".to_string(),
            ),
            ApiError::Session(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            ApiError::Hash(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn auth_failures_share_one_response() {
        let not_found = ApiError::Auth(AuthError::EmailNotFound).into_response();
        let wrong_pw = ApiError::Auth(AuthError::WrongPassword).into_response();
        assert_eq!(not_found.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_of(not_found).await, body_of(wrong_pw).await);
    }

    #[tokio::test]
    async fn status_mapping() {
        assert_eq!(
            ApiError::Validation("username is required".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("email already registered".into())
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Session(SessionError::Missing).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Store(sqlx::Error::PoolClosed).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn error_body_is_error_keyed() {
        let body = body_of(ApiError::Validation("email is required".into()).into_response()).await;
        assert_eq!(body, serde_json::json!({ "error": "email is required" }));
    }
}
