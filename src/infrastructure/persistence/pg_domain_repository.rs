//! PostgreSQL implementation of the domain repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Domain, NewDomain};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct DomainRow {
    id: i64,
    hostname: String,
    owner_id: Option<String>,
    team_id: Option<i64>,
    is_default: bool,
    verified: bool,
    verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<DomainRow> for Domain {
    fn from(r: DomainRow) -> Self {
        Domain {
            id: r.id,
            hostname: r.hostname,
            owner_id: r.owner_id,
            team_id: r.team_id,
            is_default: r.is_default,
            verified: r.verified,
            verified_at: r.verified_at,
            created_at: r.created_at,
        }
    }
}

const DOMAIN_COLUMNS: &str =
    "id, hostname, owner_id, team_id, is_default, verified, verified_at, created_at";

pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let sql = format!(
            "INSERT INTO domains (hostname, owner_id, team_id) VALUES ($1, $2, $3) \
             RETURNING {DOMAIN_COLUMNS}"
        );

        let row: DomainRow = sqlx::query_as(&sql)
            .bind(&new_domain.hostname)
            .bind(&new_domain.owner_id)
            .bind(new_domain.team_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                let unique = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if unique {
                    AppError::conflict(
                        "This hostname is already registered",
                        serde_json::json!({ "hostname": new_domain.hostname }),
                    )
                } else {
                    e.into()
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError> {
        let sql = format!("SELECT {DOMAIN_COLUMNS} FROM domains WHERE id = $1");

        let row: Option<DomainRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<Domain>, AppError> {
        let sql = format!("SELECT {DOMAIN_COLUMNS} FROM domains WHERE hostname = $1");

        let row: Option<DomainRow> = sqlx::query_as(&sql)
            .bind(hostname)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn get_default(&self) -> Result<Domain, AppError> {
        let sql = format!("SELECT {DOMAIN_COLUMNS} FROM domains WHERE is_default = TRUE LIMIT 1");

        let row: Option<DomainRow> = sqlx::query_as(&sql)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::internal("No default domain configured", serde_json::json!({}))
        })
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, AppError> {
        let sql = format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE owner_id = $1 ORDER BY created_at"
        );

        let rows: Vec<DomainRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domains WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
