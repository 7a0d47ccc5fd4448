//! Hostname extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

use crate::error::AppError;

/// Extracts the serving hostname from the `Host` header.
///
/// Handles hostnames with ports (`go.example.com:3000`), bare hostnames
/// and bracketed IPv6 literals; port numbers are stripped.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the header is missing or not
/// valid UTF-8.
pub fn extract_hostname(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    let hostname = if host.starts_with('[') {
        // IPv6 literal, e.g. [::1]:8080
        match host.find(']') {
            Some(end_bracket) => host[..=end_bracket].to_string(),
            None => host.to_string(),
        }
    } else {
        host.split(':').next().unwrap_or(host).to_string()
    };

    Ok(hostname.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_plain_hostname() {
        assert_eq!(
            extract_hostname(&headers_with_host("go.example.com")).unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn test_extract_strips_port() {
        assert_eq!(
            extract_hostname(&headers_with_host("go.example.com:3000")).unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn test_extract_lowercases() {
        assert_eq!(
            extract_hostname(&headers_with_host("Go.Example.COM")).unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn test_extract_ipv6() {
        assert_eq!(
            extract_hostname(&headers_with_host("[::1]:8080")).unwrap(),
            "[::1]"
        );
    }

    #[test]
    fn test_missing_host_header() {
        assert!(extract_hostname(&HeaderMap::new()).is_err());
    }
}
