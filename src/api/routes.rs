//! API route configuration.
//!
//! Every route here requires an asserted identity via
//! [`crate::api::middleware::identity`].

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    change_role_handler, check_availability_handler, check_verification_handler,
    create_campaign_handler, create_link_handler, create_team_handler, create_workspace_handler,
    delete_campaign_handler, delete_link_handler, delete_workspace_handler, get_link_handler,
    invite_member_handler, link_stats_handler, list_campaigns_handler, list_domains_handler,
    list_links_handler, list_members_handler, list_workspaces_handler, register_domain_handler,
    remove_member_handler, update_link_handler,
};
use crate::state::AppState;

/// Authenticated dashboard routes.
///
/// # Endpoints
///
/// - `POST   /links`                      - create a link
/// - `GET    /links`                      - list own links
/// - `GET    /links/check-availability`   - advisory custom-code check
/// - `GET    /links/{id}`                 - fetch a link
/// - `PATCH  /links/{id}`                 - partial update (code immutable)
/// - `DELETE /links/{id}`                 - idempotent delete
/// - `GET    /links/{id}/analytics`       - click analytics
/// - `POST   /teams`                      - create a team
/// - `POST   /teams/{id}/invite`          - invite a member
/// - `GET    /teams/{id}/members`         - list members
/// - `PATCH  /teams/{id}/members/{mid}`   - change role
/// - `DELETE /teams/{id}/members/{mid}`   - remove member / revoke invite
/// - `POST   /workspaces` `GET /workspaces`
/// - `DELETE /workspaces/{id}`            - deletes contained links too
/// - `POST   /campaigns` `GET /campaigns`
/// - `DELETE /campaigns/{id}`             - unlinks, never deletes links
/// - `POST   /domains` `GET /domains`
/// - `POST   /domains/{id}/verify`        - idempotent verification check
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route("/links/check-availability", get(check_availability_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/analytics", get(link_stats_handler))
        .route("/teams", post(create_team_handler))
        .route("/teams/{id}/invite", post(invite_member_handler))
        .route("/teams/{id}/members", get(list_members_handler))
        .route(
            "/teams/{id}/members/{member_id}",
            axum::routing::patch(change_role_handler).delete(remove_member_handler),
        )
        .route(
            "/workspaces",
            post(create_workspace_handler).get(list_workspaces_handler),
        )
        .route("/workspaces/{id}", delete(delete_workspace_handler))
        .route(
            "/campaigns",
            post(create_campaign_handler).get(list_campaigns_handler),
        )
        .route("/campaigns/{id}", delete(delete_campaign_handler))
        .route(
            "/domains",
            post(register_domain_handler).get(list_domains_handler),
        )
        .route("/domains/{id}/verify", post(check_verification_handler))
}
