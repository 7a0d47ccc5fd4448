//! Custom domain management and verification polling.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::domain::entities::{Domain, NewDomain};
use crate::domain::lifecycle;
use crate::domain::ports::PlanProvider;
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;

/// Poll interval for verification checks.
const VERIFY_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Total polling attempts (covers 120 seconds at the interval above).
const VERIFY_POLL_ATTEMPTS: usize = 24;

/// Service for custom domains.
///
/// Verification itself happens out-of-process (the DNS checker writes
/// `verified`/`verified_at`); this service registers hostnames, reads
/// verification state idempotently, and offers a bounded await.
pub struct DomainService {
    domains: Arc<dyn DomainRepository>,
    plans: Arc<dyn PlanProvider>,
}

impl DomainService {
    pub fn new(domains: Arc<dyn DomainRepository>, plans: Arc<dyn PlanProvider>) -> Self {
        Self { domains, plans }
    }

    /// Registers a custom hostname, unverified, subject to the plan's
    /// custom-domain ceiling.
    pub async fn register_domain(
        &self,
        owner_id: &str,
        hostname: &str,
    ) -> Result<Domain, AppError> {
        let hostname = hostname.trim().to_ascii_lowercase();
        validate_hostname(&hostname)?;

        let limits = self.plans.get_plan_limits(owner_id).await?;
        let current = self.domains.count_for_owner(owner_id).await?;
        lifecycle::validate_domain_ceiling(current, &limits)?;

        let domain = self
            .domains
            .create(NewDomain {
                hostname,
                owner_id: owner_id.to_string(),
                team_id: None,
            })
            .await?;

        tracing::info!(domain_id = domain.id, hostname = %domain.hostname, "domain registered");
        Ok(domain)
    }

    pub async fn list_domains(&self, owner_id: &str) -> Result<Vec<Domain>, AppError> {
        self.domains.list_for_owner(owner_id).await
    }

    /// The platform default domain. Used by the health check and by
    /// handlers composing public short URLs.
    pub async fn default_domain(&self) -> Result<Domain, AppError> {
        self.domains.get_default().await
    }

    /// Serving hostname for a domain id.
    pub async fn hostname_for(&self, domain_id: i64) -> Result<String, AppError> {
        let domain = self
            .domains
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::internal("Link references unknown domain", json!({})))?;
        Ok(domain.hostname)
    }

    /// Reads current verification state. Idempotent; callers may poll.
    pub async fn check_verification(
        &self,
        domain_id: i64,
        requester_id: &str,
    ) -> Result<Domain, AppError> {
        let domain = self
            .domains
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({ "id": domain_id })))?;

        if domain.owner_id.as_deref() != Some(requester_id) {
            return Err(AppError::not_found(
                "Domain not found",
                json!({ "id": domain_id }),
            ));
        }

        Ok(domain)
    }

    /// Polls [`Self::check_verification`] until the domain verifies, at a
    /// fixed 5s interval, giving up after 120s.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the window elapses without the
    /// domain becoming verified.
    pub async fn await_verification(
        &self,
        domain_id: i64,
        requester_id: &str,
    ) -> Result<Domain, AppError> {
        let strategy = FixedInterval::new(VERIFY_POLL_INTERVAL).take(VERIFY_POLL_ATTEMPTS - 1);

        let result = RetryIf::spawn(
            strategy,
            || async {
                let domain = self.check_verification(domain_id, requester_id).await?;
                if domain.verified {
                    Ok(domain)
                } else {
                    Err(AppError::conflict(
                        "Domain is not verified yet",
                        json!({ "id": domain_id }),
                    ))
                }
            },
            // Keep polling only while the answer is "not yet"; real
            // failures (missing domain, foreign owner) return immediately.
            |e: &AppError| matches!(e, AppError::Conflict { .. }),
        )
        .await;

        result.map_err(|e| match e {
            AppError::Conflict { .. } => AppError::conflict(
                "Domain verification did not complete within 120 seconds",
                json!({ "id": domain_id }),
            ),
            other => other,
        })
    }
}

/// Structural hostname validation: lowercase labels, at least one dot,
/// no scheme or path.
fn validate_hostname(hostname: &str) -> Result<(), AppError> {
    let valid_len = !hostname.is_empty() && hostname.len() <= 253;
    let has_dot = hostname.contains('.');
    let valid_chars = hostname
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
    let valid_labels = hostname
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));

    if !(valid_len && has_dot && valid_chars && valid_labels) {
        return Err(AppError::bad_request(
            "Invalid hostname",
            json!({ "hostname": hostname }),
        ));
    }

    Ok(())
}
