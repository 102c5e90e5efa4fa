//! Argon2id password hashing for the in-memory directory
//!
//! The configured salt work factor is used as the Argon2 time cost (number of
//! passes). Memory cost and parallelism stay at the crate defaults.
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use warden_core::{Error, error::utilities::StoreResultExt};

pub fn hash_password(plaintext: &str, work_factor: u32) -> Result<String, Error> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        work_factor,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_directory_err_with_context("Invalid hashing parameters")?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_directory_err_with_context("Failed to hash password")?;
    Ok(hash.to_string())
}

/// Verify against a PHC string; the parameters are read from the hash itself.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(hash).map_directory_err_with_context("Corrupt password hash")?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password123", 1).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("t=1"));
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("password124", &hash).unwrap());
    }

    #[test]
    fn test_work_factor_is_time_cost() {
        let hash = hash_password("password123", 3).unwrap();
        assert!(hash.contains("t=3"));
        assert!(verify_password("password123", &hash).unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        assert!(verify_password("password123", "not-a-phc-string").is_err());
        assert!(hash_password("password123", 0).is_err());
    }
}
