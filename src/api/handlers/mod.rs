//! HTTP handlers: thin adapters from the REST surface to the services.

pub mod campaigns;
pub mod domains;
pub mod health;
pub mod links;
pub mod resolve;
pub mod stats;
pub mod teams;
pub mod workspaces;

pub use campaigns::{create_campaign_handler, delete_campaign_handler, list_campaigns_handler};
pub use domains::{check_verification_handler, list_domains_handler, register_domain_handler};
pub use health::health_handler;
pub use links::{
    check_availability_handler, create_link_handler, delete_link_handler, get_link_handler,
    list_links_handler, update_link_handler,
};
pub use resolve::{resolve_handler, resolve_with_password_handler};
pub use stats::link_stats_handler;
pub use teams::{
    change_role_handler, claim_invitations_handler, create_team_handler, invite_member_handler,
    list_members_handler, remove_member_handler,
};
pub use workspaces::{
    create_workspace_handler, delete_workspace_handler, list_workspaces_handler,
};
