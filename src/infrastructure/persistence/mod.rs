//! PostgreSQL repository implementations.
//!
//! All statements are runtime-bound prepared statements; the schema lives
//! in `./migrations` and is applied at startup.

pub mod pg_campaign_repository;
pub mod pg_click_repository;
pub mod pg_domain_repository;
pub mod pg_link_repository;
pub mod pg_team_repository;
pub mod pg_workspace_repository;

pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_click_repository::PgClickRepository;
pub use pg_domain_repository::PgDomainRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_team_repository::PgTeamRepository;
pub use pg_workspace_repository::PgWorkspaceRepository;
