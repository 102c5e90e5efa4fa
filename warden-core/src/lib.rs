//! Core functionality for warden
//!
//! Warden binds an application's user model to an external identity store.
//! Account records and issued access tokens live in collaborators the host
//! injects; this crate holds the logic that sits in between:
//!
//! - credential normalization, including realm splitting ([`credentials`])
//! - the login / logout / confirm state machine ([`Authenticator`])
//! - registration and password flows ([`PasswordService`])
//! - the collaborator traits backends implement ([`repositories`])
//! - a static table describing the exposed operations for transports ([`remote`])
//!
//! Configuration is an immutable [`AuthConfig`] passed into every call.
//!
//! Application code normally uses the `warden` crate, which wires these
//! pieces to a storage backend.
pub mod account;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod id;
pub mod remote;
pub mod repositories;
pub mod services;
pub mod session;
pub mod validation;

pub use account::{Account, AccountId, NewAccount};
pub use config::AuthConfig;
pub use credentials::{Credentials, IncludeOptions, NormalizedQuery, normalize};
pub use error::{Error, ErrorStatus};
pub use repositories::{
    AccountDirectory, AccountDirectoryProvider, RepositoryProvider, SessionStore,
    SessionStoreProvider,
};
pub use services::{
    Authenticator, Confirmation, EmailVerificationService, PasswordService, Registration,
    ResetGrant,
};
pub use session::{IssuedToken, SessionToken, TokenId};
