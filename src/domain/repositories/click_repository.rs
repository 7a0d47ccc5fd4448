//! Repository trait for click analytics rows.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository for recorded clicks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError>;

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Most recent clicks for a link, newest first.
    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError>;
}
