//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; concrete implementations
//! live in `crate::infrastructure::persistence`. Mocks are auto-generated
//! via `mockall` for service unit tests, and the integration tests carry
//! in-memory implementations under `tests/common/`.

pub mod campaign_repository;
pub mod click_repository;
pub mod domain_repository;
pub mod link_repository;
pub mod team_repository;
pub mod workspace_repository;

pub use campaign_repository::CampaignRepository;
pub use click_repository::ClickRepository;
pub use domain_repository::DomainRepository;
pub use link_repository::LinkRepository;
pub use team_repository::TeamRepository;
pub use workspace_repository::WorkspaceRepository;

#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
#[cfg(test)]
pub use workspace_repository::MockWorkspaceRepository;
