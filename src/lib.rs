//! # Link Registry
//!
//! Multi-tenant link registry and redirect service built with Axum and
//! PostgreSQL: the authoritative mapping from `(domain, code)` to a
//! destination, with lifecycle rules (pause, date expiry, click-count
//! expiry, password gates), team/workspace/campaign grouping, plan-based
//! ceilings and click analytics.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) — entities, repository traits,
//!   external ports, the lifecycle guard and the click pipeline
//! - **Application Layer** ([`application`]) — services: link management,
//!   resolution, teams, workspaces, campaigns, domains, analytics
//! - **Infrastructure Layer** ([`infrastructure`]) — PostgreSQL
//!   repositories, billing-backed plan limits, mail transport
//! - **API Layer** ([`api`]) — REST handlers, DTOs and middleware
//!
//! ## Identity
//!
//! Authentication is delegated to an upstream identity provider; requests
//! arrive with trusted `x-auth-*` headers and every core operation takes
//! an explicit requester id.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CampaignService, CreateLinkInput, DomainService, LinkService, Resolution,
        ResolutionService, StatsService, TeamService, UpdateLinkInput, VisitorMeta,
        WorkspaceService,
    };
    pub use crate::domain::entities::{
        Campaign, Click, Domain, Link, LinkPatch, Membership, NewLink, Plan, PlanLimits, Role,
        Team, TeamMember, Workspace,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
