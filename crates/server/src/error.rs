use axum::{
    Json,
    http::{StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};
use quiz_core::CodecError;
use serde_json::json;
use services::QuizError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing answer index")]
    MissingAnswer,

    #[error("Invalid answer index: {0}")]
    InvalidAnswer(String),

    #[error(transparent)]
    Cookie(#[from] CodecError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingAnswer | AppError::InvalidAnswer(_) => StatusCode::BAD_REQUEST,
            AppError::Cookie(_) | AppError::Quiz(_) | AppError::Header(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal failures are logged here and never echoed to the client.
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
