//! Campaign entity: a non-owning grouping of links for attribution.

use chrono::{DateTime, Utc};

/// A marketing campaign referencing links without owning them.
///
/// Deleting a campaign unlinks its links (`campaign_id` cleared); the
/// links themselves remain.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: i64,
    pub owner_id: String,
    pub team_id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub owner_id: String,
    pub team_id: Option<i64>,
    pub name: String,
}
