//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`             - short link resolve (public, rate limited)
//! - `POST /{code}`             - password submission (public, stricter limit)
//! - `GET  /health`             - component health (public)
//! - `/api/*`                   - dashboard REST API (identity headers required)
//! - `POST /api/identity/claim` - identity-provider webhook (claims invites)

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{
    claim_invitations_handler, health_handler, resolve_handler, resolve_with_password_handler,
};
use crate::api::middleware::{identity, rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn(identity::layer));

    let router = Router::new()
        .route(
            "/{code}",
            get(resolve_handler).layer(rate_limit::layer()),
        )
        .route(
            "/{code}",
            post(resolve_with_password_handler).layer(rate_limit::password_layer()),
        )
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .route("/api/identity/claim", post(claim_invitations_handler))
        .layer(tracing::layer())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
