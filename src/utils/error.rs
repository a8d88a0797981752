use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Malformed, missing or empty input
    Validation(String),
    /// Duplicate registration
    Conflict(String),
    /// Login failure (unknown user or wrong password)
    Authentication(String),
    /// Path identifier is not a valid key for the store
    InvalidId,
    /// Store failure; the detail is logged, the client only sees the message
    Database { message: String, detail: String },
    Internal(String),
}

impl AppError {
    pub fn database(message: &str, detail: impl fmt::Display) -> Self {
        AppError::Database {
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Message safe to hand back to the client
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Authentication(msg)
            | AppError::Internal(msg) => msg,
            AppError::InvalidId => "invalid id",
            AppError::Database { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            AppError::InvalidId => write!(f, "Invalid id"),
            AppError::Database { message, detail } => {
                write!(f, "Database error: {} ({})", message, detail)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Database { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Database { .. } | AppError::Internal(_) => log::error!("❌ {}", self),
            _ => log::warn!("⚠️  {}", self),
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}
