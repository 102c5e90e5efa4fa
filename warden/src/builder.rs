//! Builder pattern for constructing Warden instances
//!
//! This module provides a type-safe builder for creating [`Warden`] instances with
//! compile-time validation of storage configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use warden::WardenBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let warden = WardenBuilder::new()
//!         .with_memory_storage()
//!         .with_realm_delimiter(":")
//!         .with_email_verification_required(true)
//!         .check_health(true)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use warden_core::{AuthConfig, RepositoryProvider};

use crate::Warden;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when building a Warden instance.
#[derive(Debug, thiserror::Error)]
pub enum WardenBuilderError {
    /// The storage backend failed its health check
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// ============================================================================
// Type-State Markers
// ============================================================================

/// Marker type indicating no storage has been configured yet.
///
/// This is the initial state of [`WardenBuilder`].
pub struct NoStorage;

/// Marker type indicating storage has been configured.
///
/// Contains the repository provider that will be used by Warden.
pub struct WithStorage<R: RepositoryProvider> {
    repositories: Arc<R>,
}

// ============================================================================
// Builder Implementation
// ============================================================================

/// A type-safe builder for constructing [`Warden`] instances.
///
/// # Type States
///
/// - [`NoStorage`]: Initial state, storage must be configured
/// - [`WithStorage<R>`]: Storage configured, ready to build or add more configuration
///
/// Configuration setters are only available once storage is configured.
/// The assembled [`AuthConfig`] is validated in [`WardenBuilder::build`].
pub struct WardenBuilder<Storage> {
    storage: Storage,
    config: AuthConfig,
    check_health: bool,
}

impl Default for WardenBuilder<NoStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl WardenBuilder<NoStorage> {
    /// Create a new builder with default configuration.
    ///
    /// # Defaults
    ///
    /// - Access token ttl: 2 weeks, capped at 1 year
    /// - Password reset token ttl: 15 minutes
    /// - Realms and email verification: not required
    /// - Salt work factor: 10
    /// - Health check on build: false
    pub fn new() -> Self {
        Self {
            storage: NoStorage,
            config: AuthConfig::default(),
            check_health: false,
        }
    }

    /// Use an existing repository provider as storage.
    ///
    /// This is how external identity stores are plugged in.
    pub fn with_storage<R: RepositoryProvider>(
        self,
        repositories: Arc<R>,
    ) -> WardenBuilder<WithStorage<R>> {
        WardenBuilder {
            storage: WithStorage { repositories },
            config: self.config,
            check_health: self.check_health,
        }
    }

    /// Use the in-process storage backend.
    ///
    /// Nothing is persisted; intended for tests and local development.
    #[cfg(feature = "memory")]
    pub fn with_memory_storage(
        self,
    ) -> WardenBuilder<WithStorage<crate::MemoryRepositoryProvider>> {
        self.with_storage(Arc::new(crate::MemoryRepositoryProvider::new()))
    }
}

// ============================================================================
// Configuration Methods (available after storage is configured)
// ============================================================================

impl<R: RepositoryProvider> WardenBuilder<WithStorage<R>> {
    /// Replace the whole configuration, e.g. one loaded with
    /// [`AuthConfig::from_json`].
    pub fn with_config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Default access token lifetime in seconds
    pub fn with_ttl(mut self, seconds: u64) -> Self {
        self.config.ttl = seconds;
        self
    }

    /// Upper bound for any requested access token lifetime in seconds
    pub fn with_max_ttl(mut self, seconds: u64) -> Self {
        self.config.max_ttl = seconds;
        self
    }

    pub fn with_reset_password_token_ttl(mut self, seconds: u64) -> Self {
        self.config.reset_password_token_ttl = seconds;
        self
    }

    pub fn with_realm_required(mut self, required: bool) -> Self {
        self.config.realm_required = required;
        self
    }

    /// Accept `realm<delimiter>principal` logins. Setting a delimiter makes a
    /// realm mandatory.
    pub fn with_realm_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.realm_delimiter = Some(delimiter.into());
        self
    }

    pub fn with_email_verification_required(mut self, required: bool) -> Self {
        self.config.email_verification_required = required;
        self
    }

    /// Work factor handed to the directory when hashing passwords
    pub fn with_salt_work_factor(mut self, factor: u32) -> Self {
        self.config.salt_work_factor = factor;
        self
    }

    /// Set whether to run the storage health check during build.
    ///
    /// Default: false
    pub fn check_health(mut self, check: bool) -> Self {
        self.check_health = check;
        self
    }

    /// Build the Warden instance.
    ///
    /// Fails when the configuration is invalid or, if requested, when the
    /// storage health check fails.
    pub async fn build(self) -> Result<Warden<R>, WardenBuilderError> {
        self.config
            .validate()
            .map_err(|e| WardenBuilderError::InvalidConfiguration(e.to_string()))?;

        if self.check_health {
            self.storage
                .repositories
                .health_check()
                .await
                .map_err(|e| WardenBuilderError::StorageConnection(e.to_string()))?;
        }

        let warden = Warden::new(self.storage.repositories)
            .with_config(self.config)
            .map_err(|e| WardenBuilderError::InvalidConfiguration(e.to_string()))?;

        tracing::debug!("warden built");
        Ok(warden)
    }
}
