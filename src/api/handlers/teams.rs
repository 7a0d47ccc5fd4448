//! Handlers for team management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::team::{
    ChangeRoleRequest, ClaimRequest, ClaimResponse, CreateTeamRequest, InviteRequest,
    InviteResponse, MemberResponse, TeamResponse,
};
use crate::api::middleware::identity::AuthUser;
use crate::domain::entities::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a team; the requester becomes its owner.
///
/// # Endpoint
///
/// `POST /api/teams`
pub async fn create_team_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), AppError> {
    payload.validate()?;

    let team = state.teams.create_team(&user.user_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Invites an e-mail address to a team.
///
/// When the mail transport is unavailable the response carries the
/// invite link for manual sharing.
///
/// # Endpoint
///
/// `POST /api/teams/{id}/invite`
pub async fn invite_member_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(team_id): Path<i64>,
    Json(payload): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), AppError> {
    payload.validate()?;

    let role = parse_invitable_role(payload.role.as_deref())?;

    let outcome = state
        .teams
        .invite_member(team_id, &user.user_id, &payload.email, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            member: outcome.member.into(),
            invite_link: outcome.invite_link,
        }),
    ))
}

/// Lists a team's members (active and invited).
///
/// # Endpoint
///
/// `GET /api/teams/{id}/members`
pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(team_id): Path<i64>,
) -> Result<Json<Vec<MemberResponse>>, AppError> {
    let members = state.teams.list_members(team_id, &user.user_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Changes a member's role.
///
/// # Endpoint
///
/// `PATCH /api/teams/{id}/members/{member_id}`
pub async fn change_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((team_id, member_id)): Path<(i64, i64)>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    let role = parse_invitable_role(Some(&payload.role))?;

    let member = state
        .teams
        .change_role(team_id, &user.user_id, member_id, role)
        .await?;

    Ok(Json(member.into()))
}

/// Removes a member or revokes a pending invitation.
///
/// # Endpoint
///
/// `DELETE /api/teams/{id}/members/{member_id}`
pub async fn remove_member_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((team_id, member_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .teams
        .remove_member(team_id, &user.user_id, member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Identity-provider webhook: claims pending invitations for a user
/// whose e-mail has just been verified.
///
/// # Endpoint
///
/// `POST /api/identity/claim`
pub async fn claim_invitations_handler(
    State(state): State<AppState>,
    Json(payload): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, AppError> {
    payload.validate()?;

    let claimed = state
        .teams
        .claim_invitations(&payload.user_id, &payload.email)
        .await?;

    Ok(Json(ClaimResponse { claimed }))
}

/// Parses a role string for invite/role-change requests. The owner role
/// is never accepted here.
fn parse_invitable_role(role: Option<&str>) -> Result<Role, AppError> {
    match role {
        None => Ok(Role::Member),
        Some(s) => match Role::parse(s) {
            Some(Role::Owner) => Err(AppError::forbidden(
                "The owner role cannot be granted",
                json!({}),
            )),
            Some(role) => Ok(role),
            None => Err(AppError::bad_request(
                "Unknown role",
                json!({ "role": s, "allowed": ["member", "admin"] }),
            )),
        },
    }
}
