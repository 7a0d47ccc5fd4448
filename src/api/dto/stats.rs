//! DTOs for link analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::LinkStats;
use crate::domain::entities::Click;

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub device: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl From<Click> for ClickResponse {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            referrer: click.referrer,
            device: click.device,
            country: click.country,
            city: click.city,
        }
    }
}

/// Response for `GET /api/links/{id}/analytics`.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link_id: i64,
    pub code: String,
    /// Successful redirects counted by the resolution engine.
    pub total_clicks: i64,
    /// Rows persisted by the analytics worker; may lag `total_clicks`.
    pub recorded_clicks: i64,
    pub recent: Vec<ClickResponse>,
}

impl From<LinkStats> for LinkStatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            link_id: stats.link.id,
            code: stats.link.code.clone(),
            total_clicks: stats.total_clicks,
            recorded_clicks: stats.recorded_clicks,
            recent: stats.recent.into_iter().map(Into::into).collect(),
        }
    }
}
