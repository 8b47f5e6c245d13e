use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model request failed: {0}")]
    Upstream(String),

    #[error("Model returned no content")]
    UpstreamEmpty,

    #[error("Model response is not valid JSON: {message} (response starts with: {excerpt})")]
    Parse { message: String, excerpt: String },

    #[error("Model response has an unexpected shape: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            AppError::UpstreamEmpty => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model returned an empty response",
            ),
            AppError::Parse { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error parsing model response",
            ),
            AppError::Validation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response format from model",
            ),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(json!({
            "message": message,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let response = AppError::InvalidInput("prompt is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_model_errors_are_server_errors() {
        let errors = [
            AppError::UpstreamEmpty,
            AppError::Upstream("connection refused".into()),
            AppError::Validation("missing cards".into()),
            AppError::Parse {
                message: "expected value".into(),
                excerpt: "Sure! Here".into(),
            },
        ];

        for err in errors {
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_parse_error_message_carries_excerpt() {
        let err = AppError::Parse {
            message: "expected value at line 1 column 1".into(),
            excerpt: "Here is your chart".into(),
        };
        assert!(err.to_string().contains("Here is your chart"));
    }
}
