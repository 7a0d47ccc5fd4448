//! PostgreSQL implementation of the link repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every link query.
#[derive(FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    domain_id: i64,
    destination: String,
    owner_id: Option<String>,
    workspace_id: Option<i64>,
    campaign_id: Option<i64>,
    tags: Vec<String>,
    notes: Option<String>,
    password_hash: Option<String>,
    active: bool,
    expires_at: Option<DateTime<Utc>>,
    max_clicks: Option<i32>,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            code: r.code,
            domain_id: r.domain_id,
            destination: r.destination,
            owner_id: r.owner_id,
            workspace_id: r.workspace_id,
            campaign_id: r.campaign_id,
            tags: r.tags,
            notes: r.notes,
            password_hash: r.password_hash,
            active: r.active,
            expires_at: r.expires_at,
            max_clicks: r.max_clicks,
            clicks: r.clicks,
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
        }
    }
}

const LINK_COLUMNS: &str = "id, code, domain_id, destination, owner_id, workspace_id, \
     campaign_id, tags, notes, password_hash, active, expires_at, max_clicks, clicks, \
     created_at, updated_at, deleted_at";

/// PostgreSQL repository for link records.
///
/// Uniqueness of `(domain_id, code)` among live links is enforced by the
/// `links_domain_code_live` partial index; a violated insert surfaces as
/// [`AppError::CodeTaken`] through the store-boundary error translation.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (code, domain_id, destination, owner_id, workspace_id, \
             campaign_id, tags, notes, password_hash, expires_at, max_clicks) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {LINK_COLUMNS}"
        );

        let row: LinkRow = sqlx::query_as(&sql)
            .bind(&new_link.code)
            .bind(new_link.domain_id)
            .bind(&new_link.destination)
            .bind(&new_link.owner_id)
            .bind(new_link.workspace_id)
            .bind(new_link.campaign_id)
            .bind(&new_link.tags)
            .bind(&new_link.notes)
            .bind(&new_link.password_hash)
            .bind(new_link.expires_at)
            .bind(new_link.max_clicks)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1 AND deleted_at IS NULL");

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, domain_id: i64, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE domain_id = $1 AND code = $2 AND deleted_at IS NULL"
        );

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(domain_id)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC"
        );

        let rows: Vec<LinkRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM links WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        // Clearable fields carry an "apply" flag so NULL can be written
        // deliberately, distinct from "leave unchanged".
        let sql = format!(
            "UPDATE links SET \
               destination = COALESCE($2, destination), \
               active = COALESCE($3, active), \
               tags = COALESCE($4, tags), \
               notes = CASE WHEN $5 THEN $6 ELSE notes END, \
               password_hash = CASE WHEN $7 THEN $8 ELSE password_hash END, \
               expires_at = CASE WHEN $9 THEN $10 ELSE expires_at END, \
               max_clicks = CASE WHEN $11 THEN $12 ELSE max_clicks END, \
               campaign_id = CASE WHEN $13 THEN $14 ELSE campaign_id END, \
               updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {LINK_COLUMNS}"
        );

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&patch.destination)
            .bind(patch.active)
            .bind(&patch.tags)
            .bind(patch.notes.is_some())
            .bind(patch.notes.flatten())
            .bind(patch.password_hash.is_some())
            .bind(patch.password_hash.flatten())
            .bind(patch.expires_at.is_some())
            .bind(patch.expires_at.flatten())
            .bind(patch.max_clicks.is_some())
            .bind(patch.max_clicks.flatten())
            .bind(patch.campaign_id.is_some())
            .bind(patch.campaign_id.flatten())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found("Link not found", serde_json::json!({ "id": id }))
        })
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE links SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError> {
        // One statement: the counter moves and the cap is enforced
        // atomically, so concurrent visits can never push clicks past
        // max_clicks or clobber each other.
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE links SET clicks = clicks + 1, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
               AND (max_clicks IS NULL OR clicks < max_clicks) \
             RETURNING clicks",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete_by_workspace(&self, workspace_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE workspace_id = $1")
            .bind(workspace_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn unlink_campaign(&self, campaign_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE links SET campaign_id = NULL, updated_at = NOW() WHERE campaign_id = $1",
        )
        .bind(campaign_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
