//! DTOs for the public resolve endpoints.

use serde::{Deserialize, Serialize};

/// Form body for `POST /{code}` password submissions.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub password: String,
}

/// Body rendered when a link requires a password.
#[derive(Debug, Serialize)]
pub struct PasswordGateResponse {
    pub error: &'static str,
    pub message: &'static str,
}

impl PasswordGateResponse {
    pub fn new() -> Self {
        Self {
            error: "password_required",
            message: "This link is protected. Submit the password to continue.",
        }
    }
}

impl Default for PasswordGateResponse {
    fn default() -> Self {
        Self::new()
    }
}
