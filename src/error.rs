use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller-supplied input failed a precondition.
    #[error("{0}")]
    InvalidData(String),

    #[error("Movie not found with id: {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidData(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::InvalidData(msg) => ("INVALID_DATA", msg.clone()),
            AppError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        };

        (self.status(), Json(json!({ "error": message, "code": code }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
