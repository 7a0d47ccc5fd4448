//! DTOs for team management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Membership, Team, TeamMember};

/// Request body for `POST /api/teams`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request body for `POST /api/teams/{id}/invite`.
#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email)]
    pub email: String,

    /// `member` (default) or `admin`. `owner` is never grantable.
    pub role: Option<String>,
}

/// Request body for `PATCH /api/teams/{id}/members/{member_id}`.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// Identity-webhook payload claiming pending invitations after sign-in.
#[derive(Debug, Deserialize, Validate)]
pub struct ClaimRequest {
    pub user_id: String,

    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            owner_id: team.owner_id,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub team_id: i64,
    pub status: &'static str,
    pub role: &'static str,
    pub user_id: Option<String>,
    pub invited_email: Option<String>,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl From<TeamMember> for MemberResponse {
    fn from(member: TeamMember) -> Self {
        let (status, user_id, invited_email) = match member.membership {
            Membership::Active { user_id } => ("active", Some(user_id), None),
            Membership::Invited { invited_email } => ("invited", None, Some(invited_email)),
        };

        Self {
            id: member.id,
            team_id: member.team_id,
            status,
            role: member.role.as_str(),
            user_id,
            invited_email,
            invited_at: member.invited_at,
            joined_at: member.joined_at,
        }
    }
}

/// Response for an invitation.
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub member: MemberResponse,
    /// Present when the mail transport is unavailable; share manually.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
}

/// Response for the claim webhook.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claimed: usize,
}
