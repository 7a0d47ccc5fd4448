//! Handlers for workspace endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::workspace::{CreateWorkspaceRequest, WorkspaceListQuery, WorkspaceResponse};
use crate::api::middleware::identity::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a workspace in a team.
///
/// # Endpoint
///
/// `POST /api/workspaces`
pub async fn create_workspace_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<WorkspaceResponse>), AppError> {
    payload.validate()?;

    let workspace = state
        .workspaces
        .create_workspace(payload.team_id, &user.user_id, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(workspace.into())))
}

/// Lists a team's workspaces.
///
/// # Endpoint
///
/// `GET /api/workspaces?team_id=...`
pub async fn list_workspaces_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<WorkspaceListQuery>,
) -> Result<Json<Vec<WorkspaceResponse>>, AppError> {
    let workspaces = state
        .workspaces
        .list_workspaces(query.team_id, &user.user_id)
        .await?;

    Ok(Json(workspaces.into_iter().map(Into::into).collect()))
}

/// Deletes a workspace **and the links it contains**.
///
/// # Endpoint
///
/// `DELETE /api/workspaces/{id}`
pub async fn delete_workspace_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.workspaces.delete_workspace(id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
