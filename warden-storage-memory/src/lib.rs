//! In-process storage backend for warden
//!
//! Provides an account directory and a session store that live entirely in
//! process memory. Passwords are hashed with Argon2id, using the configured
//! salt work factor as the time cost.
//!
//! Nothing is persisted: this backend is meant for tests, local development
//! and as a reference for implementing [`RepositoryProvider`] on top of a real
//! identity service.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_storage_memory::MemoryRepositoryProvider;
//!
//! let provider = Arc::new(MemoryRepositoryProvider::new());
//! ```
mod directory;
mod password;
mod session;

pub use directory::MemoryAccountDirectory;
pub use password::{hash_password, verify_password};
pub use session::MemorySessionStore;

use async_trait::async_trait;
use std::sync::Arc;
use warden_core::{
    Error,
    repositories::{AccountDirectoryProvider, RepositoryProvider, SessionStoreProvider},
};

/// Repository provider backed by process memory
///
/// This struct implements both individual provider traits as well as the
/// unified `RepositoryProvider` trait.
#[derive(Default)]
pub struct MemoryRepositoryProvider {
    directory: Arc<MemoryAccountDirectory>,
    sessions: Arc<MemorySessionStore>,
}

impl MemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountDirectoryProvider for MemoryRepositoryProvider {
    type Directory = MemoryAccountDirectory;

    fn directory(&self) -> &Self::Directory {
        &self.directory
    }
}

impl SessionStoreProvider for MemoryRepositoryProvider {
    type Sessions = MemorySessionStore;

    fn sessions(&self) -> &Self::Sessions {
        &self.sessions
    }
}

#[async_trait]
impl RepositoryProvider for MemoryRepositoryProvider {
    async fn health_check(&self) -> Result<(), Error> {
        tracing::trace!(
            accounts = self.directory.len(),
            tokens = self.sessions.len(),
            "memory storage health check"
        );
        Ok(())
    }
}
