//! DTOs for link management endpoints.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::Link;

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (must be HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub destination: String,

    /// Optional serving hostname (otherwise the platform default).
    pub domain: Option<String>,

    /// Optional custom short code.
    #[validate(length(min = 3, max = 50))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub notes: Option<String>,

    pub workspace_id: Option<i64>,

    pub campaign_id: Option<i64>,

    /// Gate password; requires a plan with password protection.
    pub password: Option<String>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = 10_000))]
    pub max_clicks: Option<i32>,
}

/// Request body for `PATCH /api/links/{id}`.
///
/// All fields are optional — only provided fields change. Clearable
/// fields follow double-option semantics: absent = unchanged, `null` =
/// clear, value = set.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub destination: Option<String>,

    /// Pause (`false`) or resume (`true`) the link.
    pub active: Option<bool>,

    pub tags: Option<Vec<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,

    /// Absent = unchanged, null = remove the gate, value = set password.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub password: Option<Option<String>>,

    /// Absent = unchanged, null = never expires, value = set expiry.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub max_clicks: Option<Option<i32>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub campaign_id: Option<Option<i64>>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub destination: String,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub password_protected: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i32>,
    pub clicks: i64,
    pub workspace_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, composing the public short URL from the
    /// serving hostname.
    pub fn from_link(link: Link, hostname: &str) -> Self {
        Self {
            id: link.id,
            short_url: format!("https://{}/{}", hostname.trim_end_matches('/'), link.code),
            code: link.code,
            destination: link.destination,
            tags: link.tags,
            notes: link.notes,
            active: link.active,
            password_protected: link.password_hash.is_some(),
            expires_at: link.expires_at,
            max_clicks: link.max_clicks,
            clicks: link.clicks,
            workspace_id: link.workspace_id,
            campaign_id: link.campaign_id,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Query parameters for `GET /api/links/check-availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub code: String,
    pub domain: Option<String>,
}

/// Response for the availability check.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub code: String,
    pub available: bool,
}
