//! HTTP API that turns web font stylesheets into structured font family data.
//!
//! The routes live in [`api`]; [`build_router`] assembles them with the
//! authentication and tracing layers.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get},
};
use state::AppState;
use tower_http::trace::TraceLayer;

pub const EARLY_ACCESS_ROUTE: &str = "/omgf/v1/fonts/early-access";
pub const ICONS_ROUTE: &str = "/omgf/v1/fonts/icons";

pub fn build_router(state: AppState) -> Router {
    // Invalidation needs an API key, lookups do not
    let auth = || from_fn_with_state(state.clone(), middleware::auth_middleware);

    Router::new()
        // Health check (no auth)
        .route("/health", get(api::health_check))
        .route(
            EARLY_ACCESS_ROUTE,
            get(api::early_access)
                .merge(delete(api::invalidate_early_access).route_layer(auth())),
        )
        .route(
            ICONS_ROUTE,
            get(api::icons).merge(delete(api::invalidate_icons).route_layer(auth())),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
