//! Handler for link analytics.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::api::middleware::identity::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Per-link analytics: redirect counter plus recent recorded clicks.
///
/// # Endpoint
///
/// `GET /api/links/{id}/analytics`
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state.stats.link_stats(id, &user.user_id).await?;
    Ok(Json(stats.into()))
}
