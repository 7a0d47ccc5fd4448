//! DTOs for campaign endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Campaign;

/// Request body for `POST /api/campaigns`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub team_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: String,
    pub team_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            owner_id: campaign.owner_id,
            team_id: campaign.team_id,
            created_at: campaign.created_at,
        }
    }
}
