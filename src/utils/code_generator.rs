//! Short code generation and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Length of auto-generated codes.
pub const GENERATED_CODE_LENGTH: usize = 7;

/// Alphabet for auto-generated codes. Lowercase-only so generated codes
/// satisfy the same charset rule as custom ones.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Codes reserved for system routes; never allocatable.
const RESERVED_CODES: &[&str] = &[
    "api", "health", "dashboard", "admin", "login", "register", "settings", "static",
];

static CUSTOM_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

/// Generates a random short code from the lowercase+digit alphabet.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; GENERATED_CODE_LENGTH];
    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-50 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 3 || code.len() > 50 {
        return Err(AppError::bad_request(
            "Custom code must be 3-50 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !CUSTOM_CODE_RE.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
