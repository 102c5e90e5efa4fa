//! Random token generation and constant-time comparison
//!
//! Access token ids and email verification tokens are 256-bit random values.
//! Verification tokens are compared with [`constant_time_compare`] so the
//! comparison does not leak how many leading bytes matched.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Generate a cryptographically secure random token.
///
/// This produces a 256-bit (32-byte) random token encoded as URL-safe base64
/// (43 characters).
pub fn generate_secure_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Perform constant-time comparison of two byte slices.
///
/// Slices of different length compare unequal immediately; the length of a
/// token is not secret.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
