//! Link entity: the authoritative mapping from a short code to a destination.

use chrono::{DateTime, Utc};

/// A registered short link with its protection and lifecycle state.
///
/// The `(domain_id, code)` pair is unique among non-deleted links. Codes are
/// immutable once allocated; every other payload field can change through
/// [`LinkPatch`].
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub domain_id: i64,
    pub destination: String,
    /// Creating user; `None` for anonymous guest links (24h TTL).
    pub owner_id: Option<String>,
    pub workspace_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    /// HMAC-SHA256 of the gate password; the plaintext is never stored.
    pub password_hash: Option<String>,
    /// When false the link resolves as NOT_FOUND, indistinguishable from
    /// an absent one.
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i32>,
    /// Monotonically non-decreasing; mutated only by the resolution
    /// engine's successful-redirect path.
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }

    /// Returns true if the click counter has reached the configured cap.
    pub fn is_click_exhausted(&self) -> bool {
        self.max_clicks.is_some_and(|m| self.clicks >= i64::from(m))
    }

    /// Returns true if resolution requires a password before redirecting.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Input for inserting a new link record.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub domain_id: i64,
    pub destination: String,
    pub owner_id: Option<String>,
    pub workspace_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub password_hash: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i32>,
}

/// Partial update for an existing link.
///
/// Outer `None` leaves a field unchanged. For clearable fields the inner
/// `Option` distinguishes "set to value" from "clear":
/// `expires_at: Some(None)` removes the expiry, `Some(Some(t))` sets it.
/// The short code is deliberately absent: codes are immutable.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub destination: Option<String>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
    pub password_hash: Option<Option<String>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub max_clicks: Option<Option<i32>>,
    pub campaign_id: Option<Option<i64>>,
}

impl LinkPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.destination.is_none()
            && self.active.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.password_hash.is_none()
            && self.expires_at.is_none()
            && self.max_clicks.is_none()
            && self.campaign_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link() -> Link {
        let now = Utc::now();
        Link {
            id: 1,
            code: "promo".to_string(),
            domain_id: 1,
            destination: "https://example.com/".to_string(),
            owner_id: Some("user_1".to_string()),
            workspace_id: None,
            campaign_id: None,
            tags: vec![],
            notes: None,
            password_hash: None,
            active: true,
            expires_at: None,
            max_clicks: None,
            clicks: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_fresh_link_has_no_lifecycle_flags() {
        let link = sample_link();
        assert!(!link.is_deleted());
        assert!(!link.is_expired_at(Utc::now()));
        assert!(!link.is_click_exhausted());
        assert!(!link.is_password_protected());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let mut link = sample_link();
        let deadline = Utc::now();
        link.expires_at = Some(deadline);

        assert!(link.is_expired_at(deadline));
        assert!(link.is_expired_at(deadline + Duration::seconds(1)));
        assert!(!link.is_expired_at(deadline - Duration::seconds(1)));
    }

    #[test]
    fn test_click_exhaustion_at_cap() {
        let mut link = sample_link();
        link.max_clicks = Some(2);

        link.clicks = 1;
        assert!(!link.is_click_exhausted());

        link.clicks = 2;
        assert!(link.is_click_exhausted());

        link.clicks = 3;
        assert!(link.is_click_exhausted());
    }

    #[test]
    fn test_empty_patch() {
        assert!(LinkPatch::default().is_empty());

        let patch = LinkPatch {
            active: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
