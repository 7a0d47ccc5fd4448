//! DTOs for custom domain endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Domain;

/// Request body for `POST /api/domains`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDomainRequest {
    #[validate(length(min = 3, max = 253))]
    pub hostname: String,
}

#[derive(Debug, Serialize)]
pub struct DomainResponse {
    pub id: i64,
    pub hostname: String,
    pub is_default: bool,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Domain> for DomainResponse {
    fn from(domain: Domain) -> Self {
        Self {
            id: domain.id,
            hostname: domain.hostname,
            is_default: domain.is_default,
            verified: domain.verified,
            verified_at: domain.verified_at,
            created_at: domain.created_at,
        }
    }
}
