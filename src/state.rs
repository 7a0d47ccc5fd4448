//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    CampaignService, DomainService, LinkService, ResolutionService, StatsService, TeamService,
    WorkspaceService,
};
use crate::domain::click_event::ClickEvent;

#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkService>,
    pub resolution: Arc<ResolutionService>,
    pub teams: Arc<TeamService>,
    pub workspaces: Arc<WorkspaceService>,
    pub campaigns: Arc<CampaignService>,
    pub domains: Arc<DomainService>,
    pub stats: Arc<StatsService>,
    /// Kept for the health check's queue-capacity report.
    pub click_tx: mpsc::Sender<ClickEvent>,
}
