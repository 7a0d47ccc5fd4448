//! Repository trait for teams and memberships.

use crate::domain::entities::{Role, Team, TeamMember};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository for teams and their member rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTeamRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Creates a team and its owner member row in one transaction.
    /// The owner role is assigned here and nowhere else.
    async fn create(&self, name: &str, owner_id: &str) -> Result<Team, AppError>;

    async fn find_team(&self, id: i64) -> Result<Option<Team>, AppError>;

    /// Finds the active membership of a user in a team.
    async fn find_member(&self, team_id: i64, user_id: &str)
    -> Result<Option<TeamMember>, AppError>;

    async fn find_member_by_id(
        &self,
        team_id: i64,
        member_id: i64,
    ) -> Result<Option<TeamMember>, AppError>;

    /// Finds a pending invitation by e-mail within a team.
    async fn find_invited(
        &self,
        team_id: i64,
        email: &str,
    ) -> Result<Option<TeamMember>, AppError>;

    /// Counts all member rows (active and invited) against the plan ceiling.
    async fn count_members(&self, team_id: i64) -> Result<i64, AppError>;

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError>;

    /// Inserts a pending invitation row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the e-mail is already invited to
    /// this team.
    async fn invite(
        &self,
        team_id: i64,
        email: &str,
        role: Role,
        invited_by: &str,
    ) -> Result<TeamMember, AppError>;

    /// Transitions one invitation to active, conditioned on the row still
    /// being `invited` at write time (compare-and-swap). Returns `true`
    /// when this call performed the transition; a concurrent claim that
    /// lost the race observes `false` and must change nothing.
    async fn claim_invitation(&self, member_id: i64, user_id: &str) -> Result<bool, AppError>;

    /// Lists pending invitations matching a verified e-mail, across teams.
    async fn list_invited_by_email(&self, email: &str) -> Result<Vec<TeamMember>, AppError>;

    async fn update_role(&self, member_id: i64, role: Role) -> Result<TeamMember, AppError>;

    /// Removes a member row. Returns `false` when already gone.
    async fn remove_member(&self, member_id: i64) -> Result<bool, AppError>;
}
