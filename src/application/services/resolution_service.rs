//! The resolution engine: the single decision procedure for inbound
//! short-link requests.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{DomainRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;

/// Outcome of resolving `(domain, code)`.
///
/// `NotFound` and `Expired` are distinct here for callers and tests, but
/// the public HTTP surface renders them identically so visitors cannot
/// probe which links exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect { destination: String },
    PasswordRequired,
    NotFound,
    Expired,
}

/// Non-identifying visitor metadata accompanying a resolve call.
#[derive(Debug, Clone, Default)]
pub struct VisitorMeta {
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Service deciding, for every inbound visit, whether to redirect, gate,
/// or fail — and recording the click on the redirect path only.
///
/// Check order is load-bearing: pause and expiry are evaluated before the
/// password gate, so an expired protected link reports `Expired` instead
/// of prompting for a password that can never succeed (and confirming the
/// link would otherwise work). The click counter moves only on the
/// terminal redirect path, and only through the store's atomic increment.
pub struct ResolutionService {
    domains: Arc<dyn DomainRepository>,
    links: Arc<dyn LinkRepository>,
    click_tx: mpsc::Sender<ClickEvent>,
    signing_secret: String,
}

impl ResolutionService {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        links: Arc<dyn LinkRepository>,
        click_tx: mpsc::Sender<ClickEvent>,
        signing_secret: String,
    ) -> Self {
        Self {
            domains,
            links,
            click_tx,
            signing_secret,
        }
    }

    /// Resolves an inbound `(hostname, code)` visit.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures surface as errors; every business
    /// outcome is a [`Resolution`] variant.
    pub async fn resolve(
        &self,
        hostname: &str,
        code: &str,
        supplied_password: Option<&str>,
        visitor: VisitorMeta,
    ) -> Result<Resolution, AppError> {
        let Some(domain) = self.domains.find_by_hostname(hostname).await? else {
            return Ok(Resolution::NotFound);
        };
        if !domain.is_usable() {
            return Ok(Resolution::NotFound);
        }

        let Some(link) = self.links.find_by_code(domain.id, code).await? else {
            metrics::counter!("resolve_failures_total", "outcome" => "not_found").increment(1);
            return Ok(Resolution::NotFound);
        };

        // Paused links are indistinguishable from absent ones.
        if !link.active {
            metrics::counter!("resolve_failures_total", "outcome" => "not_found").increment(1);
            return Ok(Resolution::NotFound);
        }

        if link.is_expired_at(Utc::now()) || link.is_click_exhausted() {
            metrics::counter!("resolve_failures_total", "outcome" => "expired").increment(1);
            return Ok(Resolution::Expired);
        }

        if let Some(stored_hash) = &link.password_hash {
            let ok = supplied_password
                .is_some_and(|pw| verify_password(&self.signing_secret, pw, stored_hash));
            if !ok {
                // The gate never counts as a visit.
                return Ok(Resolution::PasswordRequired);
            }
        }

        // Atomic, cap-guarded increment. `None` means a concurrent visit
        // consumed the final click between our read and this write.
        let Some(_count) = self.links.increment_clicks(link.id).await? else {
            metrics::counter!("resolve_failures_total", "outcome" => "expired").increment(1);
            return Ok(Resolution::Expired);
        };

        let event = ClickEvent::from_request(
            link.id,
            visitor.referrer.as_deref(),
            visitor.user_agent.as_deref(),
            visitor.country.as_deref(),
            visitor.city.as_deref(),
        );
        // Fire-and-forget: a full queue drops the analytics row, never the
        // redirect.
        if self.click_tx.try_send(event).is_err() {
            metrics::counter!("clicks_dropped_total").increment(1);
        }

        metrics::counter!("redirects_total").increment(1);
        Ok(Resolution::Redirect {
            destination: link.destination,
        })
    }
}
