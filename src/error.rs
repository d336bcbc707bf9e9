use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::users::id::InvalidIdentifier;

/// Every handler failure, mapped to a status code in one place.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier or request shape. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// No record matched. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Login mismatch. HTTP 400, same body whether the email or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Store, hasher or anything unexpected. HTTP 500; the cause is only logged.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(cause) = &self {
            error!(error = ?cause, "request failed");
        }
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<InvalidIdentifier> for AppError {
    fn from(e: InvalidIdentifier) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}
