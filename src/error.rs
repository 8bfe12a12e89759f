use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch article: {0}")]
    FetchError(String),

    #[error("Verification challenge detected")]
    ChallengeDetected,

    #[error("No valid article content found")]
    ExtractionEmpty,

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::FetchError(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ChallengeDetected => {
                (StatusCode::FORBIDDEN, "verification challenge detected".to_string())
            }
            AppError::ExtractionEmpty => {
                (StatusCode::UNPROCESSABLE_ENTITY, "no valid article content".to_string())
            }
            AppError::ParseError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::FetchError(format!("Request timed out: {}", err))
        } else if err.is_redirect() {
            AppError::FetchError(format!("Redirect limit exceeded: {}", err))
        } else {
            AppError::FetchError(err.to_string())
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
