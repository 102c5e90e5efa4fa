//! Email verification token issuance
//!
//! Confirmation itself lives on the [`Authenticator`](super::Authenticator);
//! this service only mints and stores the token. Delivering it (email, SMS,
//! a link in a welcome page) is up to the host.

use crate::{
    Error,
    account::AccountId,
    crypto::generate_secure_token,
    error::AuthError,
    repositories::AccountDirectory,
};
use std::sync::Arc;

/// Service for email verification operations
pub struct EmailVerificationService<D: AccountDirectory> {
    directory: Arc<D>,
}

impl<D: AccountDirectory> EmailVerificationService<D> {
    /// Create a new EmailVerificationService with the given directory
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Generate a verification token for an account and store it.
    ///
    /// Any previously issued token is replaced. Returns the token value to be
    /// embedded in the confirmation link.
    pub async fn issue_token(&self, account_id: &AccountId) -> Result<String, Error> {
        let mut account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = generate_secure_token();
        account.verification_token = Some(token.clone());
        self.directory.save(&account).await?;

        tracing::info!(user.id = %account.id, "issued email verification token");
        Ok(token)
    }
}
