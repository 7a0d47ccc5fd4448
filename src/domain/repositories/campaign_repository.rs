//! Repository trait for campaigns.

use crate::domain::entities::{Campaign, NewCampaign};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository for marketing campaigns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError>;

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Campaign>, AppError>;

    /// Deletes a campaign row. Links are unlinked separately by the
    /// caller; they are never deleted with the campaign.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
