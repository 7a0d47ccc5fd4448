//! Handlers for campaign endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::campaign::{CampaignResponse, CreateCampaignRequest};
use crate::api::middleware::identity::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns`
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), AppError> {
    payload.validate()?;

    let campaign = state
        .campaigns
        .create_campaign(&user.user_id, &payload.name, payload.team_id)
        .await?;

    Ok((StatusCode::CREATED, Json(campaign.into())))
}

/// Lists the requester's campaigns.
///
/// # Endpoint
///
/// `GET /api/campaigns`
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CampaignResponse>>, AppError> {
    let campaigns = state.campaigns.list_campaigns(&user.user_id).await?;
    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

/// Deletes a campaign. Its links remain, with the campaign reference
/// cleared.
///
/// # Endpoint
///
/// `DELETE /api/campaigns/{id}`
pub async fn delete_campaign_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.campaigns.delete_campaign(id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
