use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fontsheet_core::ResolutionError;
use fontsheet_traits::StoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Missing required query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Font family could not be resolved: {0}")]
    ResolutionFailed(String),

    #[error("Upstream font service request failed: {0}")]
    UpstreamFailed(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ResolutionError> for ServiceError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Fetch(e) => Self::UpstreamFailed(e.to_string()),
            e @ ResolutionError::NoFontFamily(_) => Self::ResolutionFailed(e.to_string()),
        }
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::MissingParameter(_) => {
                (StatusCode::BAD_REQUEST, "MissingParameter", self.to_string())
            }
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::ResolutionFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ResolutionFailed",
                self.to_string(),
            ),
            Self::UpstreamFailed(_) => {
                tracing::warn!("{}", self);
                (StatusCode::BAD_GATEWAY, "UpstreamFailed", self.to_string())
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Invalid or missing API key".to_string(),
            ),
            Self::Storage(_) | Self::Config(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
