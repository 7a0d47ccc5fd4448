//! Workspace entity: a team sub-grouping that owns links.

use chrono::{DateTime, Utc};

/// A workspace inside a team.
///
/// Workspaces are a strong ownership boundary: deleting one deletes the
/// links it contains (unlike campaign deletion, which only unlinks).
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a workspace.
#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub team_id: i64,
    pub name: String,
}
