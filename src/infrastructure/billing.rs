//! Plan provider backed by the subscriptions table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Plan, PlanLimits};
use crate::domain::ports::PlanProvider;
use crate::error::AppError;

#[derive(FromRow)]
struct SubscriptionRow {
    plan: String,
    current_period_end: Option<DateTime<Utc>>,
}

/// Resolves plan limits from the billing subsystem's subscription rows.
///
/// Owners without an active, unexpired subscription fall back to the free
/// tier; unknown plan names are treated the same way rather than failing
/// the request.
pub struct PgPlanProvider {
    pool: Arc<PgPool>,
}

impl PgPlanProvider {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanProvider for PgPlanProvider {
    async fn get_plan_limits(&self, owner_id: &str) -> Result<PlanLimits, AppError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            "SELECT plan, current_period_end FROM subscriptions \
             WHERE owner_id = $1 AND status = 'active' \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let plan = match row {
            Some(row) => {
                let lapsed = row.current_period_end.is_some_and(|end| end <= Utc::now());
                if lapsed {
                    Plan::Free
                } else {
                    Plan::parse(&row.plan).unwrap_or_else(|| {
                        tracing::warn!(owner_id, plan = %row.plan, "unknown plan, using free tier");
                        Plan::Free
                    })
                }
            }
            None => Plan::Free,
        };

        Ok(plan.limits())
    }
}
