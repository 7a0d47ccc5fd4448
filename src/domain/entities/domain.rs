//! Domain entity: a hostname that serves short links.

use chrono::{DateTime, Utc};

/// A domain acting as a namespace for short codes.
///
/// The platform default is pre-verified; custom domains must pass DNS
/// verification before they can serve links.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: i64,
    pub hostname: String,
    pub owner_id: Option<String>,
    pub team_id: Option<i64>,
    pub is_default: bool,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Domain {
    /// Returns true if links may be created under and resolved through
    /// this domain.
    pub fn is_usable(&self) -> bool {
        self.verified
    }
}

/// Input for registering a custom domain.
#[derive(Debug, Clone)]
pub struct NewDomain {
    pub hostname: String,
    pub owner_id: String,
    pub team_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unverified_domain_is_unusable() {
        let domain = Domain {
            id: 2,
            hostname: "links.acme.dev".to_string(),
            owner_id: Some("user_1".to_string()),
            team_id: None,
            is_default: false,
            verified: false,
            verified_at: None,
            created_at: Utc::now(),
        };
        assert!(!domain.is_usable());
    }
}
