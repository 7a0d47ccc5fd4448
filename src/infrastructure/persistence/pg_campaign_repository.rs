//! PostgreSQL implementation of the campaign repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Campaign, NewCampaign};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CampaignRow {
    id: i64,
    owner_id: String,
    team_id: Option<i64>,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(r: CampaignRow) -> Self {
        Campaign {
            id: r.id,
            owner_id: r.owner_id,
            team_id: r.team_id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}

pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let row: CampaignRow = sqlx::query_as(
            "INSERT INTO campaigns (owner_id, team_id, name) VALUES ($1, $2, $3) \
             RETURNING id, owner_id, team_id, name, created_at",
        )
        .bind(&new_campaign.owner_id)
        .bind(new_campaign.team_id)
        .bind(&new_campaign.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        let row: Option<CampaignRow> = sqlx::query_as(
            "SELECT id, owner_id, team_id, name, created_at FROM campaigns WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Campaign>, AppError> {
        let rows: Vec<CampaignRow> = sqlx::query_as(
            "SELECT id, owner_id, team_id, name, created_at FROM campaigns \
             WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
