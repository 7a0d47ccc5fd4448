//! Click entity: one successful redirect, with derived analytics only.

use chrono::{DateTime, Utc};

/// A recorded click on a link.
///
/// All analytics fields are derived (referrer header, device class from
/// the user agent, coarse geography from CDN headers). Raw client IPs are
/// never persisted.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub device: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Input for recording a click.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub referrer: Option<String>,
    pub device: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}
