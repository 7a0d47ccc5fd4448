//! Repository trait for workspaces.

use crate::domain::entities::{NewWorkspace, Workspace};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository for team workspaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError>;

    async fn list_for_team(&self, team_id: i64) -> Result<Vec<Workspace>, AppError>;

    /// Deletes a workspace row. Contained links are removed separately by
    /// the caller through the link repository. Returns `false` when the
    /// workspace is already gone.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
