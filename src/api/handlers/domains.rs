//! Handlers for custom domain endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::domain::{DomainResponse, RegisterDomainRequest};
use crate::api::middleware::identity::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a custom hostname (unverified).
///
/// # Endpoint
///
/// `POST /api/domains`
pub async fn register_domain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RegisterDomainRequest>,
) -> Result<(StatusCode, Json<DomainResponse>), AppError> {
    payload.validate()?;

    let domain = state
        .domains
        .register_domain(&user.user_id, &payload.hostname)
        .await?;

    Ok((StatusCode::CREATED, Json(domain.into())))
}

/// Lists the requester's custom domains.
///
/// # Endpoint
///
/// `GET /api/domains`
pub async fn list_domains_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<DomainResponse>>, AppError> {
    let domains = state.domains.list_domains(&user.user_id).await?;
    Ok(Json(domains.into_iter().map(Into::into).collect()))
}

/// Idempotent verification check. The dashboard polls this while DNS
/// propagates; the answer only reflects state already written by the
/// external checker.
///
/// # Endpoint
///
/// `POST /api/domains/{id}/verify`
pub async fn check_verification_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<DomainResponse>, AppError> {
    let domain = state.domains.check_verification(id, &user.user_id).await?;
    Ok(Json(domain.into()))
}
