//! Ports to external collaborators: billing and mail transport.
//!
//! The registry consumes these; it never implements payment processing or
//! e-mail delivery itself.

use async_trait::async_trait;

use crate::domain::entities::PlanLimits;
use crate::error::AppError;

/// Billing subsystem boundary: resolves an owner to their plan ceilings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Plan limits for an owner. Owners without a current subscription
    /// get the free tier; this call never fails with "no plan".
    async fn get_plan_limits(&self, owner_id: &str) -> Result<PlanLimits, AppError>;
}

/// Mail transport failure modes.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// No transport is configured in this deployment.
    #[error("mail transport is not configured")]
    Unconfigured,

    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Outbound e-mail boundary.
///
/// Callers must not treat a failure as fatal: the documented fallback is
/// to return the action's artifact (e.g. an invite link) directly to the
/// caller instead of silently dropping it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError>;
}
