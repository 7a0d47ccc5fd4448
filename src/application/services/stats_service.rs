//! Click analytics over recorded link visits.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::entities::{Click, Link};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Default number of recent clicks returned per link.
const RECENT_CLICKS_LIMIT: i64 = 50;

/// Aggregated analytics for one link.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: Link,
    /// Successful redirects as counted by the resolution engine.
    pub total_clicks: i64,
    /// Clicks persisted by the analytics worker. May lag `total_clicks`
    /// because recording is asynchronous and best-effort.
    pub recorded_clicks: i64,
    pub recent: Vec<Click>,
}

/// Service exposing per-link click analytics.
///
/// Access control is delegated to the link service: whoever may manage a
/// link may read its analytics.
pub struct StatsService {
    links: Arc<LinkService>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<LinkService>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    pub async fn link_stats(&self, link_id: i64, requester_id: &str) -> Result<LinkStats, AppError> {
        let link = self.links.get_link(link_id, requester_id).await?;

        let recorded_clicks = self.clicks.count_for_link(link_id).await?;
        let recent = self
            .clicks
            .recent_for_link(link_id, RECENT_CLICKS_LIMIT)
            .await?;

        Ok(LinkStats {
            total_clicks: link.clicks,
            link,
            recorded_clicks,
            recent,
        })
    }
}
