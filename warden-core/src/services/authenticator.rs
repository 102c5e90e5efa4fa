//! Login, logout and email confirmation
//!
//! The [`Authenticator`] is stateless: it holds its two collaborators and
//! receives the configuration on every call. Login failures caused by the
//! directory (unknown principal, wrong password, lookup or comparison errors)
//! all surface as [`AuthError::LoginFailed`] so callers cannot probe which
//! accounts exist. The only specific login failure is an unverified email.
use std::sync::Arc;

use crate::{
    Error,
    account::{Account, AccountId},
    config::AuthConfig,
    credentials::{Credentials, IncludeOptions, normalize},
    crypto::constant_time_compare,
    error::{AuthError, SessionError},
    repositories::{AccountDirectory, SessionStore},
    session::{IssuedToken, SessionToken, TokenId},
};

/// Outcome of a successful email confirmation.
///
/// The redirect target is echoed back untouched; performing the redirect is
/// the transport's job.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub account: Account,
    pub redirect: Option<String>,
}

pub struct Authenticator<D: AccountDirectory, S: SessionStore> {
    directory: Arc<D>,
    sessions: Arc<S>,
}

impl<D: AccountDirectory, S: SessionStore> Authenticator<D, S> {
    pub fn new(directory: Arc<D>, sessions: Arc<S>) -> Self {
        Self {
            directory,
            sessions,
        }
    }

    /// Log in with credentials and issue an access token.
    pub async fn login(
        &self,
        credentials: &Credentials,
        include: &IncludeOptions,
        config: &AuthConfig,
    ) -> Result<IssuedToken, Error> {
        let realm_required = config.requires_realm();
        let query = normalize(credentials, realm_required, config.realm_delimiter());

        if realm_required && query.realm.is_none() {
            tracing::debug!("login rejected: no realm could be resolved");
            return Err(AuthError::RealmRequired.into());
        }

        if !query.has_principal() {
            tracing::debug!("login rejected: no username or email");
            return Err(AuthError::UsernameOrEmailRequired.into());
        }

        let account = match self.directory.find_one(&query).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!(realm = ?query.realm, "login failed: no matching account");
                return Err(AuthError::LoginFailed.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "account lookup failed during login");
                return Err(AuthError::LoginFailed.into());
            }
        };

        match self
            .directory
            .compare_password(&account, &credentials.password)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(user.id = %account.id, "login failed: password mismatch");
                return Err(AuthError::LoginFailed.into());
            }
            Err(e) => {
                tracing::warn!(user.id = %account.id, error = %e, "password comparison failed during login");
                return Err(AuthError::LoginFailed.into());
            }
        }

        if config.email_verification_required && !account.is_email_verified() {
            tracing::debug!(user.id = %account.id, "login refused: email not verified");
            return Err(AuthError::LoginFailedEmailNotVerified.into());
        }

        let token = match self
            .create_access_token(&account, credentials.ttl, config)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(user.id = %account.id, error = %e, "token creation failed during login");
                return Err(AuthError::LoginFailed.into());
            }
        };

        tracing::info!(user.id = %account.id, ttl = token.ttl, "login succeeded");

        let user = include.wants_user().then_some(account);
        Ok(IssuedToken { token, user })
    }

    /// Destroy the access token with the given id.
    pub async fn logout(&self, token_id: &TokenId) -> Result<(), Error> {
        let token = self
            .sessions
            .find_by_id(token_id)
            .await?
            .ok_or(SessionError::TokenNotFound)?;

        self.sessions.destroy(&token).await?;

        tracing::info!(user.id = %token.user_id, "logged out");
        Ok(())
    }

    /// Confirm an account's email address with its verification token.
    pub async fn confirm(
        &self,
        account_id: &AccountId,
        token: &str,
        redirect: Option<&str>,
    ) -> Result<Confirmation, Error> {
        let mut account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = account
            .verification_token
            .as_deref()
            .is_some_and(|expected| constant_time_compare(expected.as_bytes(), token.as_bytes()));
        if !matches {
            return Err(AuthError::InvalidToken(format!(
                "verification token rejected for account {account_id}"
            ))
            .into());
        }

        account.mark_email_verified();
        let account = self.directory.save(&account).await?;

        tracing::info!(user.id = %account.id, "email confirmed");
        Ok(Confirmation {
            account,
            redirect: redirect.map(str::to_string),
        })
    }

    /// Issue an access token for an account, clamping the lifetime to `max_ttl`.
    pub async fn create_access_token(
        &self,
        account: &Account,
        requested_ttl: Option<u64>,
        config: &AuthConfig,
    ) -> Result<SessionToken, Error> {
        let ttl = config.clamp_ttl(requested_ttl);
        self.sessions.create(&account.id, ttl).await
    }

    /// Resolve an access token presented by a client.
    ///
    /// Expired tokens are destroyed and reported as [`SessionError::Expired`].
    pub async fn resolve_token(&self, token_id: &TokenId) -> Result<SessionToken, Error> {
        let token = self
            .sessions
            .find_by_id(token_id)
            .await?
            .ok_or(SessionError::TokenNotFound)?;

        if token.is_expired() {
            self.sessions.destroy(&token).await?;
            return Err(SessionError::Expired.into());
        }

        Ok(token)
    }
}
