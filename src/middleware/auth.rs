use crate::error::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// API key authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let api_key = state.api_key.as_deref().ok_or(ServiceError::Unauthorized)?;

    // Extract API key from X-API-Key header
    let request_key = headers
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .ok_or(ServiceError::Unauthorized)?;

    if request_key != api_key {
        return Err(ServiceError::Unauthorized);
    }

    Ok(next.run(request).await)
}
