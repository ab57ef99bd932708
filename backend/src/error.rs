use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy surfaced by every service and handler. Each variant maps
/// to exactly one HTTP status; 4xx bodies carry the message under `detail`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or constraint-violating input (field bounds, regex
    /// mismatch, unresolvable name reference).
    #[error("{0}")]
    Validation(String),

    /// Uniqueness or foreign-key breach reported by the store.
    #[error("{0}")]
    Constraint(String),

    /// Primary-key or name lookup miss.
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or unresolvable token.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Constraint(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("Not found.".to_string()),
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    Self::Constraint(db.message().to_string())
                }
                _ => Self::Internal(anyhow::Error::from(sqlx::Error::Database(db))),
            },
            other => Self::Internal(anyhow::Error::from(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {:?}", self);
            return (status, Json(json!({ "detail": "Internal server error." }))).into_response();
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
