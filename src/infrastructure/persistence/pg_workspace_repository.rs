//! PostgreSQL implementation of the workspace repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{NewWorkspace, Workspace};
use crate::domain::repositories::WorkspaceRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct WorkspaceRow {
    id: i64,
    team_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(r: WorkspaceRow) -> Self {
        Workspace {
            id: r.id,
            team_id: r.team_id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}

pub struct PgWorkspaceRepository {
    pool: Arc<PgPool>,
}

impl PgWorkspaceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError> {
        let row: WorkspaceRow = sqlx::query_as(
            "INSERT INTO workspaces (team_id, name) VALUES ($1, $2) \
             RETURNING id, team_id, name, created_at",
        )
        .bind(new_workspace.team_id)
        .bind(&new_workspace.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError> {
        let row: Option<WorkspaceRow> =
            sqlx::query_as("SELECT id, team_id, name, created_at FROM workspaces WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_team(&self, team_id: i64) -> Result<Vec<Workspace>, AppError> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(
            "SELECT id, team_id, name, created_at FROM workspaces \
             WHERE team_id = $1 ORDER BY created_at",
        )
        .bind(team_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
