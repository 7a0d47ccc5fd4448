//! Handlers for link management endpoints.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{
    AvailabilityQuery, AvailabilityResponse, CreateLinkRequest, LinkResponse, UpdateLinkRequest,
};
use crate::api::middleware::identity::AuthUser;
use crate::application::services::{CreateLinkInput, UpdateLinkInput};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Errors
///
/// - 400 — invalid destination, custom code or expiry settings
/// - 403 — plan ceiling reached (`limit_exceeded`, with upgrade hint)
/// - 409 — custom code already taken (`code_taken`)
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .links
        .create_link(
            &user.user_id,
            CreateLinkInput {
                destination: payload.destination,
                hostname: payload.domain,
                custom_code: payload.custom_code,
                tags: payload.tags,
                notes: payload.notes,
                workspace_id: payload.workspace_id,
                campaign_id: payload.campaign_id,
                password: payload.password,
                expires_at: payload.expires_at,
                max_clicks: payload.max_clicks,
            },
        )
        .await?;

    let hostname = state.domains.hostname_for(link.domain_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &hostname)),
    ))
}

/// Lists the requester's links.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.links.list_links(&user.user_id).await?;
    let responses = with_hostnames(&state, links).await?;
    Ok(Json(responses))
}

/// Fetches one link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.links.get_link(id, &user.user_id).await?;
    let hostname = state.domains.hostname_for(link.domain_id).await?;
    Ok(Json(LinkResponse::from_link(link, &hostname)))
}

/// Partially updates a link. The short code cannot be changed.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .links
        .update_link(
            id,
            &user.user_id,
            UpdateLinkInput {
                destination: payload.destination,
                active: payload.active,
                tags: payload.tags,
                notes: payload.notes,
                password: payload.password,
                expires_at: payload.expires_at,
                max_clicks: payload.max_clicks,
                campaign_id: payload.campaign_id,
            },
        )
        .await?;

    let hostname = state.domains.hostname_for(link.domain_id).await?;
    Ok(Json(LinkResponse::from_link(link, &hostname)))
}

/// Deletes a link. Idempotent: repeated deletes return 204 as well.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.links.delete_link(id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Live availability check for the dashboard's custom-code input.
/// Advisory: creation can still lose a race after a positive answer.
///
/// # Endpoint
///
/// `GET /api/links/check-availability?code=...&domain=...`
pub async fn check_availability_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let available = state
        .links
        .check_availability(query.domain.as_deref(), &query.code)
        .await?;

    Ok(Json(AvailabilityResponse {
        code: query.code,
        available,
    }))
}

/// Resolves hostnames for a batch of links with one lookup per domain.
async fn with_hostnames(
    state: &AppState,
    links: Vec<Link>,
) -> Result<Vec<LinkResponse>, AppError> {
    let mut hostnames: HashMap<i64, String> = HashMap::new();

    let mut responses = Vec::with_capacity(links.len());
    for link in links {
        let hostname = match hostnames.get(&link.domain_id) {
            Some(hostname) => hostname.clone(),
            None => {
                let hostname = state.domains.hostname_for(link.domain_id).await?;
                hostnames.insert(link.domain_id, hostname.clone());
                hostname
            }
        };
        responses.push(LinkResponse::from_link(link, &hostname));
    }

    Ok(responses)
}
