//! # Warden
//!
//! Warden binds an application's user model to an external identity store.
//! Account records and access tokens stay in the store you already run; warden
//! supplies the credential handling in between:
//!
//! - Login with username or email, optionally scoped to a realm
//! - Logout by destroying an access token
//! - Email confirmation with a verification token
//! - Registration, password change and password reset
//!
//! The store is plugged in through a [`RepositoryProvider`]. An in-process
//! backend is available with the `memory` feature (enabled by default).
//!
//! ## Example
//!
//! ```rust,no_run
//! use warden::{Credentials, IncludeOptions, NewAccount, WardenBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let warden = WardenBuilder::new()
//!         .with_memory_storage()
//!         .with_ttl(3600)
//!         .build()
//!         .await?;
//!
//!     warden
//!         .register(
//!             NewAccount::builder()
//!                 .email("alice@example.com")
//!                 .password("password123")
//!                 .build()?,
//!         )
//!         .await?;
//!
//!     let token = warden
//!         .login(
//!             &Credentials::with_email("alice@example.com", "password123"),
//!             &IncludeOptions::user(),
//!         )
//!         .await?;
//!     warden.logout(token.id()).await?;
//!
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

use warden_core::{
    AccountDirectory, RepositoryProvider,
    repositories::{AccountDirectoryAdapter, SessionStoreAdapter},
    services::{Authenticator, EmailVerificationService, PasswordService},
};

mod builder;

pub use builder::{NoStorage, WardenBuilder, WardenBuilderError, WithStorage};

/// Re-export core types from warden_core
///
/// These types are commonly used when working with the Warden API.
pub use warden_core::{
    Account, AccountId, AuthConfig, Confirmation, Credentials, Error, ErrorStatus, IncludeOptions,
    IssuedToken, NewAccount, Registration, ResetGrant, SessionToken, TokenId,
    config::AuthConfigBuilder,
    remote::{REMOTE_METHODS, RemoteMethod, remote_method},
};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding feature is enabled.
#[cfg(feature = "memory")]
pub use warden_storage_memory::MemoryRepositoryProvider;

type Directory<R> = AccountDirectoryAdapter<R>;
type Sessions<R> = SessionStoreAdapter<R>;

/// The entry point that wires the services to a storage backend.
///
/// `Warden` owns the resolved [`AuthConfig`] and hands it to every service
/// call. It holds no other state, so it can be shared freely behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use warden::{MemoryRepositoryProvider, TokenId, Warden};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let warden = Warden::new(Arc::new(MemoryRepositoryProvider::new()));
///
///     let token = warden.resolve_token(&TokenId::new("presented-token")).await;
///     assert!(token.is_err());
///
///     Ok(())
/// }
/// ```
pub struct Warden<R: RepositoryProvider> {
    repositories: Arc<R>,
    directory: Arc<Directory<R>>,
    authenticator: Arc<Authenticator<Directory<R>, Sessions<R>>>,
    password_service: Arc<PasswordService<Directory<R>, Sessions<R>>>,
    verification_service: Arc<EmailVerificationService<Directory<R>>>,
    config: AuthConfig,
}

impl<R: RepositoryProvider> Warden<R> {
    /// Create a new Warden instance with the default configuration
    pub fn new(repositories: Arc<R>) -> Self {
        let directory = Arc::new(AccountDirectoryAdapter::new(repositories.clone()));
        let sessions = Arc::new(SessionStoreAdapter::new(repositories.clone()));

        Self {
            repositories,
            authenticator: Arc::new(Authenticator::new(directory.clone(), sessions.clone())),
            password_service: Arc::new(PasswordService::new(directory.clone(), sessions)),
            verification_service: Arc::new(EmailVerificationService::new(directory.clone())),
            directory,
            config: AuthConfig::default(),
        }
    }

    /// Replace the configuration. The configuration is validated first.
    pub fn with_config(mut self, config: AuthConfig) -> Result<Self, Error> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Health check for the backing stores
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Get an account by its ID
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>, Error> {
        self.directory.find_by_id(account_id).await
    }

    /// Log in with username or email and password.
    ///
    /// Pass [`IncludeOptions::user`] to get the account attached to the
    /// returned token.
    pub async fn login(
        &self,
        credentials: &Credentials,
        include: &IncludeOptions,
    ) -> Result<IssuedToken, Error> {
        self.authenticator
            .login(credentials, include, &self.config)
            .await
    }

    /// Log out by destroying the presented access token
    pub async fn logout(&self, token_id: &TokenId) -> Result<(), Error> {
        self.authenticator.logout(token_id).await
    }

    /// Confirm an account's email address.
    ///
    /// The redirect target is echoed back in the [`Confirmation`]; the caller
    /// performs the redirect.
    pub async fn confirm(
        &self,
        account_id: &AccountId,
        token: &str,
        redirect: Option<&str>,
    ) -> Result<Confirmation, Error> {
        self.authenticator.confirm(account_id, token, redirect).await
    }

    /// Issue an access token for an account without checking credentials
    pub async fn create_access_token(
        &self,
        account: &Account,
        ttl: Option<u64>,
    ) -> Result<SessionToken, Error> {
        self.authenticator
            .create_access_token(account, ttl, &self.config)
            .await
    }

    /// Resolve a presented access token. Expired tokens are destroyed.
    pub async fn resolve_token(&self, token_id: &TokenId) -> Result<SessionToken, Error> {
        self.authenticator.resolve_token(token_id).await
    }

    /// Register a new account
    pub async fn register(&self, new_account: NewAccount) -> Result<Registration, Error> {
        self.password_service
            .register(new_account, &self.config)
            .await
    }

    /// Issue a fresh email verification token, replacing any pending one.
    ///
    /// Delivering the token is up to the caller.
    pub async fn request_verification(&self, account_id: &AccountId) -> Result<String, Error> {
        self.verification_service.issue_token(account_id).await
    }

    /// Change an account's password after checking the current one
    pub async fn change_password(
        &self,
        account_id: &AccountId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        self.password_service
            .change_password(account_id, old_password, new_password, &self.config)
            .await
    }

    /// Request a password reset token for an email or username.
    ///
    /// The identifier is normalized like login credentials; its password is
    /// ignored. Returns `None` when no account matches, which callers should
    /// not reveal to the client.
    pub async fn request_password_reset(
        &self,
        identifier: &Credentials,
    ) -> Result<Option<ResetGrant>, Error> {
        self.password_service
            .request_password_reset(identifier, &self.config)
            .await
    }

    /// Set a new password with a reset token.
    ///
    /// All access tokens of the account are revoked afterwards.
    pub async fn reset_password(&self, token_id: &TokenId, new_password: &str) -> Result<(), Error> {
        self.password_service
            .reset_password(token_id, new_password, &self.config)
            .await
    }
}
