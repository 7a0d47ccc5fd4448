//! Identity extraction from trusted auth-proxy headers.
//!
//! Authentication itself is delegated to an upstream identity provider;
//! by the time a request reaches this service, a trusted proxy has
//! already verified the session and asserted the caller's identity in
//! headers. This middleware turns those headers into an explicit
//! [`AuthUser`] passed to handlers — core operations never read ambient
//! auth state.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;

/// Header carrying the verified user id.
pub const USER_ID_HEADER: &str = "x-auth-user-id";
/// Header carrying the user's e-mail address.
pub const EMAIL_HEADER: &str = "x-auth-user-email";
/// Header carrying the e-mail verification flag (`true`/`1`).
pub const EMAIL_VERIFIED_HEADER: &str = "x-auth-email-verified";

/// The authenticated requester, injected into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Rejects requests without an asserted identity; otherwise injects
/// [`AuthUser`] for downstream handlers.
pub async fn layer(mut req: Request, next: Next) -> Result<Response, AppError> {
    let headers = req.headers();

    let user_id = header_str(headers, USER_ID_HEADER)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "No identity asserted for this request" }),
            )
        })?
        .to_string();

    let email = header_str(headers, EMAIL_HEADER).map(|s| s.to_ascii_lowercase());
    let email_verified = header_str(headers, EMAIL_VERIFIED_HEADER)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);

    req.extensions_mut().insert(AuthUser {
        user_id,
        email,
        email_verified,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_str_filters_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(header_str(&headers, USER_ID_HEADER).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user_1"));
        assert_eq!(header_str(&headers, USER_ID_HEADER), Some("user_1"));
    }
}
