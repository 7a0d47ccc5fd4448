//! Team management: creation, invitations, claims, role changes.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Membership, Role, Team, TeamMember};
use crate::domain::lifecycle;
use crate::domain::ports::{Mailer, PlanProvider};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

/// Result of an invitation.
///
/// `invite_link` is populated when the mail transport is unavailable so
/// the caller can hand the link out manually instead of losing it.
#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub member: TeamMember,
    pub invite_link: Option<String>,
}

/// Service for team membership and its transitions.
///
/// Role checks use the ordered [`Role`] enum; the owner role is assigned
/// exactly once at team creation and is unreachable through invitations
/// or role changes. Invitation claims are compare-and-swap transitions so
/// concurrent claimers cannot double-join.
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    plans: Arc<dyn PlanProvider>,
    mailer: Arc<dyn Mailer>,
    base_url: String,
}

impl TeamService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        plans: Arc<dyn PlanProvider>,
        mailer: Arc<dyn Mailer>,
        base_url: String,
    ) -> Self {
        Self {
            teams,
            plans,
            mailer,
            base_url,
        }
    }

    /// Creates a team; the creator becomes its owner member.
    pub async fn create_team(&self, requester_id: &str, name: &str) -> Result<Team, AppError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 100 {
            return Err(AppError::bad_request(
                "Team name must be 1-100 characters",
                json!({ "provided_length": name.len() }),
            ));
        }

        let team = self.teams.create(name, requester_id).await?;
        tracing::info!(team_id = team.id, "team created");
        Ok(team)
    }

    /// Invites an e-mail address to a team.
    ///
    /// The member ceiling is taken from the *team owner's* plan, not the
    /// inviter's. When the mail transport is unconfigured or fails, the
    /// invite link is returned to the caller instead of being dropped.
    pub async fn invite_member(
        &self,
        team_id: i64,
        requester_id: &str,
        email: &str,
        role: Role,
    ) -> Result<InviteOutcome, AppError> {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::bad_request(
                "A valid e-mail address is required",
                json!({ "email": email }),
            ));
        }

        let team = self.require_team(team_id).await?;
        let inviter_role = self.require_role(&team, requester_id).await?;

        let owner_limits = self.plans.get_plan_limits(&team.owner_id).await?;
        let member_count = self.teams.count_members(team_id).await?;
        lifecycle::validate_invite(inviter_role, role, member_count, &owner_limits)?;

        if self.teams.find_invited(team_id, &email).await?.is_some() {
            return Err(AppError::conflict(
                "This e-mail is already invited",
                json!({ "email": email }),
            ));
        }

        let member = self
            .teams
            .invite(team_id, &email, role, requester_id)
            .await?;

        let invite_link = format!(
            "{}/sign-up?email={}",
            self.base_url.trim_end_matches('/'),
            urlencode(&email)
        );

        let html = format!(
            "<p>You have been invited to collaborate on <strong>{}</strong>.</p>\
             <p><a href=\"{invite_link}\">Accept the invitation</a></p>",
            team.name
        );

        let mailed = self
            .mailer
            .send(&email, &format!("You've been invited to join {}", team.name), &html)
            .await;

        let invite_link = match mailed {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(team_id, error = %e, "invite mail not delivered, returning link");
                Some(invite_link)
            }
        };

        Ok(InviteOutcome {
            member,
            invite_link,
        })
    }

    /// Claims every pending invitation matching a signed-in user's
    /// verified e-mail. Returns how many rows this call transitioned.
    ///
    /// Each transition is a compare-and-swap on the `invited` state, so a
    /// race with another claimer resolves to exactly one winner per row.
    pub async fn claim_invitations(
        &self,
        user_id: &str,
        verified_email: &str,
    ) -> Result<usize, AppError> {
        let email = verified_email.trim().to_ascii_lowercase();
        let pending = self.teams.list_invited_by_email(&email).await?;

        let mut claimed = 0;
        for member in pending {
            if self.teams.claim_invitation(member.id, user_id).await? {
                claimed += 1;
                tracing::info!(member_id = member.id, team_id = member.team_id, "invitation claimed");
            }
        }

        Ok(claimed)
    }

    /// Lists members; restricted to the team itself.
    pub async fn list_members(
        &self,
        team_id: i64,
        requester_id: &str,
    ) -> Result<Vec<TeamMember>, AppError> {
        let team = self.require_team(team_id).await?;
        self.require_role(&team, requester_id).await?;
        self.teams.list_members(team_id).await
    }

    /// Changes a member's role. Owner rows are untouchable; only a
    /// strictly higher role may change a lower one.
    pub async fn change_role(
        &self,
        team_id: i64,
        requester_id: &str,
        member_id: i64,
        new_role: Role,
    ) -> Result<TeamMember, AppError> {
        let team = self.require_team(team_id).await?;
        let changer_role = self.require_role(&team, requester_id).await?;

        let target = self
            .teams
            .find_member_by_id(team_id, member_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Member not found", json!({ "member_id": member_id }))
            })?;

        lifecycle::validate_role_change(changer_role, target.role, new_role)?;

        self.teams.update_role(member_id, new_role).await
    }

    /// Removes a member (or revokes a pending invitation).
    pub async fn remove_member(
        &self,
        team_id: i64,
        requester_id: &str,
        member_id: i64,
    ) -> Result<(), AppError> {
        let team = self.require_team(team_id).await?;
        let remover_role = self.require_role(&team, requester_id).await?;

        let target = match self.teams.find_member_by_id(team_id, member_id).await? {
            Some(target) => target,
            None => return Ok(()),
        };

        if target.role == Role::Owner {
            return Err(AppError::forbidden(
                "The team owner cannot be removed",
                json!({}),
            ));
        }

        // Members may remove themselves; otherwise a strictly higher role
        // is required.
        let self_removal = matches!(
            &target.membership,
            Membership::Active { user_id } if user_id == requester_id
        );
        if !self_removal && !remover_role.can_change(target.role) {
            return Err(AppError::forbidden(
                "Only a higher role can remove this member",
                json!({ "member_id": member_id }),
            ));
        }

        let _ = self.teams.remove_member(member_id).await?;
        Ok(())
    }

    async fn require_team(&self, team_id: i64) -> Result<Team, AppError> {
        self.teams
            .find_team(team_id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({ "team_id": team_id })))
    }

    /// Resolves the requester's role in a team, or `NotFound` for
    /// strangers (membership is not disclosed to outsiders).
    async fn require_role(&self, team: &Team, user_id: &str) -> Result<Role, AppError> {
        if team.owner_id == user_id {
            return Ok(Role::Owner);
        }

        match self.teams.find_member(team.id, user_id).await? {
            Some(member) if member.membership.is_active() => Ok(member.role),
            _ => Err(AppError::not_found(
                "Team not found",
                json!({ "team_id": team.id }),
            )),
        }
    }
}

/// Minimal percent-encoding for the e-mail query parameter.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
