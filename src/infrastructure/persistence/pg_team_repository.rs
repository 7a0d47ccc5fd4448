//! PostgreSQL implementation of the team repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Membership, Role, Team, TeamMember};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    owner_id: String,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team {
            id: r.id,
            name: r.name,
            owner_id: r.owner_id,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
struct MemberRow {
    id: i64,
    team_id: i64,
    user_id: Option<String>,
    invited_email: Option<String>,
    role: String,
    status: String,
    invited_by: Option<String>,
    invited_at: DateTime<Utc>,
    joined_at: Option<DateTime<Utc>>,
}

impl TryFrom<MemberRow> for TeamMember {
    type Error = AppError;

    fn try_from(r: MemberRow) -> Result<Self, AppError> {
        let membership = match (r.status.as_str(), r.user_id, r.invited_email) {
            ("active", Some(user_id), _) => Membership::Active { user_id },
            ("invited", _, Some(invited_email)) => Membership::Invited { invited_email },
            _ => {
                return Err(AppError::internal(
                    "Inconsistent team member row",
                    serde_json::json!({ "member_id": r.id }),
                ));
            }
        };

        let role = Role::parse(&r.role).ok_or_else(|| {
            AppError::internal(
                "Unknown member role",
                serde_json::json!({ "member_id": r.id, "role": r.role }),
            )
        })?;

        Ok(TeamMember {
            id: r.id,
            team_id: r.team_id,
            membership,
            role,
            invited_by: r.invited_by,
            invited_at: r.invited_at,
            joined_at: r.joined_at,
        })
    }
}

const MEMBER_COLUMNS: &str =
    "id, team_id, user_id, invited_email, role, status, invited_by, invited_at, joined_at";

/// PostgreSQL repository for teams and memberships.
pub struct PgTeamRepository {
    pool: Arc<PgPool>,
}

impl PgTeamRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create(&self, name: &str, owner_id: &str) -> Result<Team, AppError> {
        let mut tx = self.pool.begin().await?;

        let team: TeamRow = sqlx::query_as(
            "INSERT INTO teams (name, owner_id) VALUES ($1, $2) \
             RETURNING id, name, owner_id, created_at",
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        // The owner member row is created here and only here.
        sqlx::query(
            "INSERT INTO team_members (team_id, user_id, role, status, joined_at) \
             VALUES ($1, $2, 'owner', 'active', NOW())",
        )
        .bind(team.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(team.into())
    }

    async fn find_team(&self, id: i64) -> Result<Option<Team>, AppError> {
        let row: Option<TeamRow> =
            sqlx::query_as("SELECT id, name, owner_id, created_at FROM teams WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_member(
        &self,
        team_id: i64,
        user_id: &str,
    ) -> Result<Option<TeamMember>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members WHERE team_id = $1 AND user_id = $2"
        );

        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_member_by_id(
        &self,
        team_id: i64,
        member_id: i64,
    ) -> Result<Option<TeamMember>, AppError> {
        let sql =
            format!("SELECT {MEMBER_COLUMNS} FROM team_members WHERE team_id = $1 AND id = $2");

        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(team_id)
            .bind(member_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_invited(
        &self,
        team_id: i64,
        email: &str,
    ) -> Result<Option<TeamMember>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members \
             WHERE team_id = $1 AND invited_email = $2 AND status = 'invited'"
        );

        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(team_id)
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn count_members(&self, team_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
            .bind(team_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members WHERE team_id = $1 ORDER BY invited_at"
        );

        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(team_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn invite(
        &self,
        team_id: i64,
        email: &str,
        role: Role,
        invited_by: &str,
    ) -> Result<TeamMember, AppError> {
        let sql = format!(
            "INSERT INTO team_members (team_id, invited_email, role, status, invited_by) \
             VALUES ($1, $2, $3, 'invited', $4) \
             RETURNING {MEMBER_COLUMNS}"
        );

        let row: MemberRow = sqlx::query_as(&sql)
            .bind(team_id)
            .bind(email)
            .bind(role.as_str())
            .bind(invited_by)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(
                        "This e-mail is already invited",
                        serde_json::json!({ "email": email }),
                    )
                } else {
                    e.into()
                }
            })?;

        row.try_into()
    }

    async fn claim_invitation(&self, member_id: i64, user_id: &str) -> Result<bool, AppError> {
        // Compare-and-swap: the transition happens only if the row is
        // still invited at write time. The loser of a race sees zero
        // affected rows.
        let result = sqlx::query(
            "UPDATE team_members \
             SET user_id = $2, invited_email = NULL, status = 'active', joined_at = NOW() \
             WHERE id = $1 AND status = 'invited'",
        )
        .bind(member_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            // Already an active member of this team: treat as not claimed.
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_invited_by_email(&self, email: &str) -> Result<Vec<TeamMember>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members \
             WHERE invited_email = $1 AND status = 'invited'"
        );

        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_role(&self, member_id: i64, role: Role) -> Result<TeamMember, AppError> {
        let sql = format!(
            "UPDATE team_members SET role = $2 WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        );

        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(member_id)
            .bind(role.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(AppError::not_found(
                "Member not found",
                serde_json::json!({ "member_id": member_id }),
            )),
        }
    }

    async fn remove_member(&self, member_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(member_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
