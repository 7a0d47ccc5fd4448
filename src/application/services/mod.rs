//! Application services orchestrating repositories and external ports.

pub mod campaign_service;
pub mod domain_service;
pub mod link_service;
pub mod resolution_service;
pub mod stats_service;
pub mod team_service;
pub mod workspace_service;

pub use campaign_service::CampaignService;
pub use domain_service::DomainService;
pub use link_service::{CreateLinkInput, LinkService, UpdateLinkInput};
pub use resolution_service::{Resolution, ResolutionService, VisitorMeta};
pub use stats_service::{LinkStats, StatsService};
pub use team_service::{InviteOutcome, TeamService};
pub use workspace_service::WorkspaceService;
