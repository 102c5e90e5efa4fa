use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    config::AuthConfig,
    credentials::{Credentials, normalize},
    error::{AuthError, ValidationError},
    repositories::{AccountDirectory, SessionStore},
    services::EmailVerificationService,
    session::{SessionToken, TokenId},
    validation::{validate_email, validate_password, validate_principal},
};
use std::sync::Arc;

/// A freshly registered account
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: Account,
    /// Present when email verification is required and the account was not
    /// created pre-verified
    pub verification_token: Option<String>,
}

/// A password reset token together with the account it was issued for.
/// Delivering the token is left to the host.
#[derive(Debug, Clone)]
pub struct ResetGrant {
    pub account: Account,
    pub token: SessionToken,
}

/// Service for registration and password operations
pub struct PasswordService<D: AccountDirectory, S: SessionStore> {
    directory: Arc<D>,
    sessions: Arc<S>,
    verification: Arc<EmailVerificationService<D>>,
}

impl<D: AccountDirectory, S: SessionStore> PasswordService<D, S> {
    /// Create a new PasswordService with the given collaborators
    pub fn new(directory: Arc<D>, sessions: Arc<S>) -> Self {
        let verification = Arc::new(EmailVerificationService::new(directory.clone()));
        Self {
            directory,
            sessions,
            verification,
        }
    }

    /// Register a new account.
    ///
    /// Input is validated before the directory is touched. When the
    /// configuration requires email verification a verification token is
    /// issued right away. If issuing it fails the account is still returned,
    /// with `verification_token: None`; call `request_verification` to retry.
    pub async fn register(
        &self,
        new_account: NewAccount,
        config: &AuthConfig,
    ) -> Result<Registration, Error> {
        if let Some(email) = &new_account.email {
            validate_email(email)?;
            validate_principal("Email", email, config.realm_delimiter())?;
        }
        if let Some(username) = &new_account.username {
            validate_principal("Username", username, config.realm_delimiter())?;
        }
        if config.requires_realm() && new_account.realm.is_none() {
            return Err(AuthError::RealmRequired.into());
        }
        if !config.requires_realm() && new_account.realm.is_some() {
            return Err(ValidationError::InvalidField(
                "Realm is not accepted when realms are disabled".to_string(),
            )
            .into());
        }
        validate_password(&new_account.password)?;

        let pre_verified = new_account.email_verified;
        let account = self
            .directory
            .create(new_account, config.salt_work_factor)
            .await?;

        tracing::info!(user.id = %account.id, "registered account");

        // the account exists from here on; request_verification reissues the token
        let verification_token = if config.email_verification_required && !pre_verified {
            match self.verification.issue_token(&account.id).await {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::warn!(user.id = %account.id, error = %e, "failed to issue verification token at registration");
                    None
                }
            }
        } else {
            None
        };

        Ok(Registration {
            account,
            verification_token,
        })
    }

    /// Change an account's password, proving knowledge of the current one.
    pub async fn change_password(
        &self,
        account_id: &AccountId,
        old_password: &str,
        new_password: &str,
        config: &AuthConfig,
    ) -> Result<(), Error> {
        let account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .directory
            .compare_password(&account, old_password)
            .await?
        {
            return Err(AuthError::InvalidPassword.into());
        }

        validate_password(new_password)?;

        self.directory
            .set_password(account_id, new_password, config.salt_work_factor)
            .await?;

        tracing::info!(user.id = %account_id, "password changed");
        Ok(())
    }

    /// Issue a short-lived reset token for the account named by `identifier`.
    ///
    /// The identifier is an email or a username, normalized exactly like login
    /// input; its password is ignored. Returns `Ok(None)` for unknown
    /// principals so callers cannot tell whether an account is registered.
    pub async fn request_password_reset(
        &self,
        identifier: &Credentials,
        config: &AuthConfig,
    ) -> Result<Option<ResetGrant>, Error> {
        let realm_required = config.requires_realm();
        let query = normalize(identifier, realm_required, config.realm_delimiter());

        if realm_required && query.realm.is_none() {
            return Err(AuthError::RealmRequired.into());
        }
        if !query.has_principal() {
            return Err(AuthError::UsernameOrEmailRequired.into());
        }

        let Some(account) = self.directory.find_one(&query).await? else {
            tracing::debug!(realm = ?query.realm, "password reset requested for unknown account");
            return Ok(None);
        };

        let token = self
            .sessions
            .create(&account.id, config.reset_password_token_ttl)
            .await?;

        tracing::info!(user.id = %account.id, ttl = token.ttl, "issued password reset token");
        Ok(Some(ResetGrant { account, token }))
    }

    /// Set a new password using a reset token.
    ///
    /// Every access token of the account, the reset token included, is
    /// destroyed afterwards.
    pub async fn reset_password(
        &self,
        token_id: &TokenId,
        new_password: &str,
        config: &AuthConfig,
    ) -> Result<(), Error> {
        validate_password(new_password)?;

        let token = self
            .sessions
            .find_by_id(token_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("Invalid or expired reset token".to_string()))?;

        if token.is_expired() {
            self.sessions.destroy(&token).await?;
            return Err(AuthError::InvalidToken("Invalid or expired reset token".to_string()).into());
        }

        self.directory
            .set_password(&token.user_id, new_password, config.salt_work_factor)
            .await?;
        self.sessions.destroy_for_account(&token.user_id).await?;

        tracing::info!(user.id = %token.user_id, "password reset");
        Ok(())
    }
}
