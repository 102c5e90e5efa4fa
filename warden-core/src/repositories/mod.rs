//! Collaborator traits for the external stores
//!
//! Services never talk to a backend directly. They consume the two traits
//! defined here:
//!
//! - [`AccountDirectory`] looks up accounts and checks passwords
//! - [`SessionStore`] creates, finds and destroys access tokens
//!
//! # Trait Hierarchy
//!
//! - Individual `*Provider` traits give access to each collaborator
//! - [`RepositoryProvider`] combines them and adds a health check
//!
//! A backend that wraps a single remote identity API typically implements
//! both collaborators on one client and exposes them through a single provider.

pub mod account;
pub mod adapter;
pub mod session;

pub use account::AccountDirectory;
pub use adapter::{AccountDirectoryAdapter, SessionStoreAdapter};
pub use session::SessionStore;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for account directory access.
pub trait AccountDirectoryProvider: Send + Sync + 'static {
    /// The account directory implementation type
    type Directory: AccountDirectory;

    /// Get the account directory
    fn directory(&self) -> &Self::Directory;
}

/// Provider trait for session store access.
pub trait SessionStoreProvider: Send + Sync + 'static {
    /// The session store implementation type
    type Sessions: SessionStore;

    /// Get the session store
    fn sessions(&self) -> &Self::Sessions;
}

/// Provider trait that storage implementations must implement to back warden.
///
/// # Example
///
/// ```rust,ignore
/// use warden_core::repositories::*;
///
/// struct CloudDirectory { /* ... */ }
///
/// impl AccountDirectoryProvider for CloudDirectory {
///     type Directory = CloudAccounts;
///     fn directory(&self) -> &Self::Directory { &self.accounts }
/// }
///
/// // ... implement SessionStoreProvider ...
///
/// #[async_trait]
/// impl RepositoryProvider for CloudDirectory {
///     async fn health_check(&self) -> Result<(), Error> { /* ... */ }
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: AccountDirectoryProvider + SessionStoreProvider {
    /// Health check for the backing stores
    async fn health_check(&self) -> Result<(), Error>;
}
