//! Service layer for business logic
//!
//! Services hold their collaborators behind `Arc` and take the
//! [`AuthConfig`](crate::AuthConfig) on every call.

pub mod authenticator;
pub mod email_verification;
pub mod password;

#[cfg(test)]
pub(crate) mod mock;

pub use authenticator::{Authenticator, Confirmation};
pub use email_verification::EmailVerificationService;
pub use password::{PasswordService, Registration, ResetGrant};
