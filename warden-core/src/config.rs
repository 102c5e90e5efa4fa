//! Authentication configuration
//!
//! [`AuthConfig`] is resolved once when the host starts and then passed by
//! reference into every service call. It is never mutated afterwards.
//!
//! | Field                         | Default      | Description                                            |
//! | ----------------------------- | ------------ | ------------------------------------------------------ |
//! | `ttl`                         | 1,209,600 s  | Default lifetime of an access token (2 weeks).         |
//! | `max_ttl`                     | 31,556,926 s | Upper bound for any requested lifetime (1 year).       |
//! | `reset_password_token_ttl`    | 900 s        | Lifetime of a password reset token (15 minutes).       |
//! | `realm_required`              | `false`      | Every login must resolve a realm.                      |
//! | `realm_delimiter`             | unset        | Splits `realm<delim>principal`; implies realm required. |
//! | `email_verification_required` | `false`      | Refuse logins until the email is verified.             |
//! | `salt_work_factor`            | 10           | Work factor handed to the directory when hashing.      |
use serde::{Deserialize, Serialize};

use crate::{Error, error::ValidationError};

pub const DEFAULT_TTL: u64 = 1_209_600;
pub const DEFAULT_MAX_TTL: u64 = 31_556_926;
pub const DEFAULT_RESET_PASSWORD_TOKEN_TTL: u64 = 900;
pub const DEFAULT_SALT_WORK_FACTOR: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthConfig {
    /// Default access token lifetime in seconds
    pub ttl: u64,

    /// Maximum access token lifetime in seconds
    #[serde(alias = "maxTTL")]
    pub max_ttl: u64,

    /// Password reset token lifetime in seconds
    #[serde(alias = "resetPasswordTokenTTL")]
    pub reset_password_token_ttl: u64,

    pub realm_required: bool,

    pub realm_delimiter: Option<String>,

    pub email_verification_required: bool,

    pub salt_work_factor: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_ttl: DEFAULT_MAX_TTL,
            reset_password_token_ttl: DEFAULT_RESET_PASSWORD_TOKEN_TTL,
            realm_required: false,
            realm_delimiter: None,
            email_verification_required: false,
            salt_work_factor: DEFAULT_SALT_WORK_FACTOR,
        }
    }
}

impl AuthConfig {
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Parse a configuration from JSON. Missing keys keep their defaults.
    ///
    /// ```rust
    /// use warden_core::AuthConfig;
    ///
    /// let config = AuthConfig::from_json(r#"{ "maxTTL": 60, "realmDelimiter": "/" }"#).unwrap();
    /// assert_eq!(config.max_ttl, 60);
    /// assert!(config.requires_realm());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: AuthConfig = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidField(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Whether logins must resolve a realm. A configured delimiter implies it.
    pub fn requires_realm(&self) -> bool {
        self.realm_required || self.realm_delimiter.is_some()
    }

    /// The realm delimiter, if one is configured and non-empty
    pub fn realm_delimiter(&self) -> Option<&str> {
        self.realm_delimiter.as_deref().filter(|d| !d.is_empty())
    }

    /// Resolve the lifetime of a new access token:
    /// `min(requested or ttl, max_ttl)`.
    pub fn clamp_ttl(&self, requested: Option<u64>) -> u64 {
        requested.unwrap_or(self.ttl).min(self.max_ttl)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl == 0 {
            return Err(ValidationError::InvalidField(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.max_ttl == 0 {
            return Err(ValidationError::InvalidField(
                "maxTTL must be greater than zero".to_string(),
            ));
        }
        if self.reset_password_token_ttl == 0 {
            return Err(ValidationError::InvalidField(
                "resetPasswordTokenTTL must be greater than zero".to_string(),
            ));
        }
        if matches!(self.realm_delimiter.as_deref(), Some("")) {
            return Err(ValidationError::InvalidField(
                "realmDelimiter must not be empty".to_string(),
            ));
        }
        if self.salt_work_factor == 0 {
            return Err(ValidationError::InvalidField(
                "saltWorkFactor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct AuthConfigBuilder {
    config: AuthConfig,
}

impl AuthConfigBuilder {
    pub fn ttl(mut self, seconds: u64) -> Self {
        self.config.ttl = seconds;
        self
    }

    pub fn max_ttl(mut self, seconds: u64) -> Self {
        self.config.max_ttl = seconds;
        self
    }

    pub fn reset_password_token_ttl(mut self, seconds: u64) -> Self {
        self.config.reset_password_token_ttl = seconds;
        self
    }

    pub fn realm_required(mut self, required: bool) -> Self {
        self.config.realm_required = required;
        self
    }

    pub fn realm_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.realm_delimiter = Some(delimiter.into());
        self
    }

    pub fn email_verification_required(mut self, required: bool) -> Self {
        self.config.email_verification_required = required;
        self
    }

    pub fn salt_work_factor(mut self, factor: u32) -> Self {
        self.config.salt_work_factor = factor;
        self
    }

    pub fn build(self) -> Result<AuthConfig, Error> {
        self.config.validate()?;
        Ok(self.config)
    }
}
