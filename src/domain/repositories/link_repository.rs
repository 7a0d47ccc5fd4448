//! Repository trait for link records.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// The link record store: durable CRUD over the `(domain, code)` mapping.
///
/// The storage layer is the source of truth for code uniqueness. Any
/// pre-check done by callers is advisory; `create` must surface a
/// constraint violation from a lost race as [`AppError::CodeTaken`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeTaken`] if `(domain_id, code)` already
    /// exists among non-deleted links — including when a concurrent
    /// create committed first.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a live link by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a live link by domain and code. The hot resolution path.
    async fn find_by_code(&self, domain_id: i64, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists an owner's live links, newest first.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError>;

    /// Counts an owner's live links, for plan-ceiling checks.
    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError>;

    /// Applies a partial update. Fields absent from the patch are left
    /// unchanged; the short code is immutable and not patchable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live link has this id.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Soft-deletes a link. Returns `false` when the link is absent or
    /// already deleted, so callers can treat repeat deletes as no-ops.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically counts one click, guarding the click cap in the same
    /// statement. Returns the new count, or `None` when the link is gone
    /// or the cap was reached by a concurrent visit.
    ///
    /// Never implemented as read-modify-write: a concurrent edit must not
    /// clobber the increment, and the counter must never pass `max_clicks`.
    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError>;

    /// Hard-deletes every link in a workspace (workspace deletion is a
    /// strong ownership boundary). Returns the number removed.
    async fn delete_by_workspace(&self, workspace_id: i64) -> Result<u64, AppError>;

    /// Detaches every link from a campaign without deleting them.
    /// Returns the number unlinked.
    async fn unlink_campaign(&self, campaign_id: i64) -> Result<u64, AppError>;
}
