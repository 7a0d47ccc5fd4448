//! Campaign management.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Campaign, NewCampaign};
use crate::domain::repositories::{CampaignRepository, LinkRepository};
use crate::error::AppError;

/// Service for campaigns: non-owning link groupings for attribution.
///
/// Deleting a campaign unlinks its links; the links remain. This is the
/// counterpart asymmetry to workspace deletion.
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    links: Arc<dyn LinkRepository>,
}

impl CampaignService {
    pub fn new(campaigns: Arc<dyn CampaignRepository>, links: Arc<dyn LinkRepository>) -> Self {
        Self { campaigns, links }
    }

    pub async fn create_campaign(
        &self,
        owner_id: &str,
        name: &str,
        team_id: Option<i64>,
    ) -> Result<Campaign, AppError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 100 {
            return Err(AppError::bad_request(
                "Campaign name must be 1-100 characters",
                json!({ "provided_length": name.len() }),
            ));
        }

        self.campaigns
            .create(NewCampaign {
                owner_id: owner_id.to_string(),
                team_id,
                name: name.to_string(),
            })
            .await
    }

    pub async fn list_campaigns(&self, owner_id: &str) -> Result<Vec<Campaign>, AppError> {
        self.campaigns.list_for_owner(owner_id).await
    }

    /// Deletes a campaign, unlinking its links first. Idempotent: an
    /// absent campaign is a silent success.
    pub async fn delete_campaign(&self, id: i64, requester_id: &str) -> Result<(), AppError> {
        let campaign = match self.campaigns.find_by_id(id).await? {
            Some(campaign) => campaign,
            None => return Ok(()),
        };

        if campaign.owner_id != requester_id {
            return Err(AppError::not_found(
                "Campaign not found",
                json!({ "id": id }),
            ));
        }

        let unlinked = self.links.unlink_campaign(id).await?;
        let _ = self.campaigns.delete(id).await?;

        tracing::info!(campaign_id = id, links_unlinked = unlinked, "campaign deleted");
        Ok(())
    }
}
