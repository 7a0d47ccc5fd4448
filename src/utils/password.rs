//! Link-password hashing.
//!
//! Gate passwords are stored as HMAC-SHA256 MACs keyed by the server
//! signing secret. An attacker with read-only database access cannot
//! verify candidate passwords without the secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a plaintext gate password for storage.
///
/// Returns a 64-character lowercase hex-encoded MAC.
pub fn hash_password(secret: &str, password: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a supplied password against a stored hash.
///
/// Recomputes the MAC and compares via the MAC's own constant-time
/// verification.
pub fn verify_password(secret: &str, password: &str, stored_hash: &str) -> bool {
    let Ok(expected) = hex::decode(stored_hash) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
