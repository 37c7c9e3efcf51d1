use crate::models::FailureResponse;
use axum::{http::StatusCode, Json};

pub const STORAGE_FAILURE_MESSAGE: &str = "Failed to update counter due to a database error.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    /// Storage failures keep their cause for the log but answer with a fixed message.
    pub fn storage(err: impl std::error::Error) -> Self {
        tracing::error!("counter storage failed: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: STORAGE_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = FailureResponse {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
