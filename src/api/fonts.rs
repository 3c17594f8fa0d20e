use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use fontsheet_core::{FontFamilyResult, FontKind, FontRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FontQuery {
    pub stylesheet: Option<String>,
    /// Forwarded upstream as-is; not part of the cache key.
    #[serde(default)]
    pub ver: String,
}

impl FontQuery {
    fn stylesheet(&self) -> Result<&str> {
        self.stylesheet
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ServiceError::MissingParameter("stylesheet"))
    }
}

/// A query that failed to deserialize is answered with the JSON error body.
type QueryParams = std::result::Result<Query<FontQuery>, QueryRejection>;

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub removed: bool,
}

/// `GET /omgf/v1/fonts/early-access?stylesheet=<file>.css&ver=<token>`
pub async fn early_access(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<FontFamilyResult>> {
    let Query(query) = query?;
    family(&state, FontKind::Webfont, &query).await
}

/// `GET /omgf/v1/fonts/icons?stylesheet=<family-id>&ver=<token>`
pub async fn icons(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<FontFamilyResult>> {
    let Query(query) = query?;
    family(&state, FontKind::Icon, &query).await
}

pub async fn invalidate_early_access(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<InvalidateResponse>> {
    let Query(query) = query?;
    invalidate(&state, FontKind::Webfont, &query).await
}

pub async fn invalidate_icons(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<InvalidateResponse>> {
    let Query(query) = query?;
    invalidate(&state, FontKind::Icon, &query).await
}

async fn family(state: &AppState, kind: FontKind, query: &FontQuery) -> Result<Json<FontFamilyResult>> {
    let request = FontRequest::new(kind, query.stylesheet()?, query.ver.as_str());
    tracing::debug!("{} request for '{}' (ver '{}')", kind, request.stylesheet, request.version);

    let result = state.fonts.family(&request).await?;
    Ok(Json(result))
}

async fn invalidate(state: &AppState, kind: FontKind, query: &FontQuery) -> Result<Json<InvalidateResponse>> {
    let stylesheet = query.stylesheet()?;
    let removed = state.fonts.invalidate(kind, stylesheet).await?;
    Ok(Json(InvalidateResponse { removed }))
}
