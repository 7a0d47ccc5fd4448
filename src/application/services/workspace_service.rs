//! Workspace management.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewWorkspace, Role, Team, Workspace};
use crate::domain::repositories::{LinkRepository, TeamRepository, WorkspaceRepository};
use crate::error::AppError;

/// Service for team workspaces.
///
/// Workspace deletion removes the links it contains. This is deliberately
/// asymmetric with campaign deletion (which only unlinks) and is pending
/// product sign-off as a firm contract.
pub struct WorkspaceService {
    workspaces: Arc<dyn WorkspaceRepository>,
    teams: Arc<dyn TeamRepository>,
    links: Arc<dyn LinkRepository>,
}

impl WorkspaceService {
    pub fn new(
        workspaces: Arc<dyn WorkspaceRepository>,
        teams: Arc<dyn TeamRepository>,
        links: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            workspaces,
            teams,
            links,
        }
    }

    /// Creates a workspace; requires admin or owner in the team.
    pub async fn create_workspace(
        &self,
        team_id: i64,
        requester_id: &str,
        name: &str,
    ) -> Result<Workspace, AppError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 100 {
            return Err(AppError::bad_request(
                "Workspace name must be 1-100 characters",
                json!({ "provided_length": name.len() }),
            ));
        }

        let team = self.require_team(team_id).await?;
        self.require_min_role(&team, requester_id, Role::Admin)
            .await?;

        self.workspaces
            .create(NewWorkspace {
                team_id,
                name: name.to_string(),
            })
            .await
    }

    /// Lists a team's workspaces; any active member may look.
    pub async fn list_workspaces(
        &self,
        team_id: i64,
        requester_id: &str,
    ) -> Result<Vec<Workspace>, AppError> {
        let team = self.require_team(team_id).await?;
        self.require_min_role(&team, requester_id, Role::Member)
            .await?;
        self.workspaces.list_for_team(team_id).await
    }

    /// Deletes a workspace and the links it contains. Idempotent: an
    /// absent workspace is a silent success.
    pub async fn delete_workspace(&self, id: i64, requester_id: &str) -> Result<(), AppError> {
        let workspace = match self.workspaces.find_by_id(id).await? {
            Some(workspace) => workspace,
            None => return Ok(()),
        };

        let team = self.require_team(workspace.team_id).await?;
        self.require_min_role(&team, requester_id, Role::Admin)
            .await?;

        let removed = self.links.delete_by_workspace(id).await?;
        let _ = self.workspaces.delete(id).await?;

        tracing::info!(workspace_id = id, links_removed = removed, "workspace deleted");
        Ok(())
    }

    async fn require_team(&self, team_id: i64) -> Result<Team, AppError> {
        self.teams
            .find_team(team_id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({ "team_id": team_id })))
    }

    async fn require_min_role(
        &self,
        team: &Team,
        user_id: &str,
        min_role: Role,
    ) -> Result<(), AppError> {
        if team.owner_id == user_id {
            return Ok(());
        }

        match self.teams.find_member(team.id, user_id).await? {
            Some(member) if member.membership.is_active() && member.role >= min_role => Ok(()),
            Some(_) => Err(AppError::forbidden(
                "Insufficient role",
                json!({ "team_id": team.id }),
            )),
            None => Err(AppError::not_found(
                "Team not found",
                json!({ "team_id": team.id }),
            )),
        }
    }
}
