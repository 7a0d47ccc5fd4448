//! Repository trait for domains.

use crate::domain::entities::{Domain, NewDomain};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository for the hostnames that serve short links.
///
/// Verification status is written by the external DNS checker; this
/// repository only reads it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Registers a custom domain, unverified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hostname is already registered.
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError>;

    /// Hostname lookup on the resolution path.
    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<Domain>, AppError>;

    /// The platform default domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no default is configured; this is
    /// a deployment error, not a caller error.
    async fn get_default(&self) -> Result<Domain, AppError>;

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, AppError>;

    /// Counts an owner's custom domains against the plan ceiling.
    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError>;
}
