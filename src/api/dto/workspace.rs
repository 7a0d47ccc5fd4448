//! DTOs for workspace endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Workspace;

/// Request body for `POST /api/workspaces`.
///
/// Deleting a workspace later deletes the links it contains — the
/// opposite of campaign deletion, which leaves links in place.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkspaceRequest {
    pub team_id: i64,

    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Query parameters for `GET /api/workspaces`.
#[derive(Debug, Deserialize)]
pub struct WorkspaceListQuery {
    pub team_id: i64,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id,
            team_id: workspace.team_id,
            name: workspace.name,
            created_at: workspace.created_at,
        }
    }
}
