//! ID generation utilities with prefix support
//!
//! Account ids minted by warden look like `acc_<base64>`. IDs are generated
//! with at least 96 bits of entropy and are URL-safe. Ids coming from an
//! external directory are accepted as-is and never need to match this format.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::RngCore;

/// Generate a prefixed ID with 96 bits of entropy
///
/// The ID format is: `{prefix}_{random_string}`
/// Where the random string is base64 URL-safe encoded without padding.
pub fn generate_prefixed_id(prefix: &str) -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}
