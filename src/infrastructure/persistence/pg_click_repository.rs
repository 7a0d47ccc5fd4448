//! PostgreSQL implementation of the click repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    referrer: Option<String>,
    device: Option<String>,
    country: Option<String>,
    city: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            link_id: r.link_id,
            clicked_at: r.clicked_at,
            referrer: r.referrer,
            device: r.device,
            country: r.country,
            city: r.city,
        }
    }
}

pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO link_clicks (link_id, referrer, device, country, city) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(new_click.link_id)
        .bind(&new_click.referrer)
        .bind(&new_click.device)
        .bind(&new_click.country)
        .bind(&new_click.city)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let rows: Vec<ClickRow> = sqlx::query_as(
            "SELECT id, link_id, clicked_at, referrer, device, country, city \
             FROM link_clicks WHERE link_id = $1 \
             ORDER BY clicked_at DESC LIMIT $2",
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
