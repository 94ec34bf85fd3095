use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    /// Client sent a body that could not be decoded.
    #[error("{error}: {message}")]
    MalformedBody { error: String, message: String },

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(anyhow::Error),

    /// An upstream dependency failed. `error` is the stable summary shown to
    /// clients, `message` carries the upstream failure description.
    #[error("{error}: {message}")]
    BadGateway { error: String, message: String },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn bad_gateway(error: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::BadGateway {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// JSON error body shared by every service endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error, message) = match self {
            AppError::BadRequest(err) => (err.to_string(), None),
            AppError::MalformedBody { error, message } => (error, Some(message)),
            AppError::NotFound(err) | AppError::MethodNotAllowed(err) => (err.to_string(), None),
            AppError::BadGateway { error, message } => (error, Some(message)),
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                ("Internal server error".to_string(), None)
            }
            AppError::ConfigError(err) => (
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}
