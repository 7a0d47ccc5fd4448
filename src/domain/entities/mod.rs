//! Core domain entities.
//!
//! Plain data structures without business logic, following the pattern of
//! separate input structs for creation (`NewLink`, `NewDomain`, ...) and
//! patch structs for partial updates (`LinkPatch`).

pub mod campaign;
pub mod click;
pub mod domain;
pub mod link;
pub mod plan;
pub mod team;
pub mod workspace;

pub use campaign::{Campaign, NewCampaign};
pub use click::{Click, NewClick};
pub use domain::{Domain, NewDomain};
pub use link::{Link, LinkPatch, NewLink};
pub use plan::{Plan, PlanLimits, Subscription};
pub use team::{Membership, Role, Team, TeamMember};
pub use workspace::{NewWorkspace, Workspace};
