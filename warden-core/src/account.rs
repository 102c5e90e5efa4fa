//! Accounts held by the account directory
//!
//! Accounts are owned by the external directory. Warden only reads them and,
//! during email verification, flips `email_verified` / clears the
//! `verification_token` before asking the directory to save the record.
//!
//! | Field                | Type             | Description                                        |
//! | -------------------- | ---------------- | -------------------------------------------------- |
//! | `id`                 | `AccountId`      | The directory's identifier for the account.         |
//! | `username`           | `Option<String>` | Login name, unique within a realm.                  |
//! | `email`              | `Option<String>` | Email address, unique within a realm.               |
//! | `realm`              | `Option<String>` | Tenant namespace, when realms are in use.           |
//! | `password_hash`      | `String`         | Opaque hash, only interpreted by the directory.     |
//! | `email_verified`     | `bool`           | Whether the email address has been confirmed.       |
//! | `verification_token` | `Option<String>` | Pending email verification token.                   |
//! | `created_at`         | `DateTime`       | The timestamp when the account was created.         |
//! | `updated_at`         | `DateTime`       | The timestamp when the account was last updated.    |
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    error::{ValidationError, utilities::RequiredFieldExt},
    id::generate_prefixed_id,
};

/// A unique, stable identifier for an account.
/// Treat as opaque; external directories use their own formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acc"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,

    // Never leaves the process in serialized form.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub email_verified: bool,

    #[serde(skip_serializing, default)]
    pub verification_token: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

const REDACTED: &str = "[redacted]";

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("realm", &self.realm)
            .field("password_hash", &REDACTED)
            .field("email_verified", &self.email_verified)
            .field(
                "verification_token",
                &self.verification_token.as_ref().map(|_| REDACTED),
            )
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    /// Mark the email as verified and drop the pending token.
    pub fn mark_email_verified(&mut self) {
        self.verification_token = None;
        self.email_verified = true;
        self.updated_at = Utc::now();
    }
}

#[derive(Default)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    username: Option<String>,
    email: Option<String>,
    realm: Option<String>,
    password_hash: Option<String>,
    email_verified: bool,
    verification_token: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn realm(mut self, realm: Option<String>) -> Self {
        self.realm = realm;
        self
    }

    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn verification_token(mut self, verification_token: Option<String>) -> Self {
        self.verification_token = verification_token;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> Result<Account, Error> {
        if self.username.is_none() && self.email.is_none() {
            return Err(ValidationError::MissingField(
                "Username or email is required".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        Ok(Account {
            id: self.id.unwrap_or_default(),
            username: self.username,
            email: self.email,
            realm: self.realm,
            password_hash: self.password_hash.require_field("Password hash")?,
            email_verified: self.email_verified,
            verification_token: self.verification_token,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Registration input. The plaintext password is handed to the directory,
/// which owns hashing.
#[derive(Clone)]
pub struct NewAccount {
    pub id: AccountId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub realm: Option<String>,
    pub password: String,
    pub email_verified: bool,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("realm", &self.realm)
            .field("password", &REDACTED)
            .field("email_verified", &self.email_verified)
            .finish()
    }
}

impl NewAccount {
    pub fn builder() -> NewAccountBuilder {
        NewAccountBuilder::default()
    }
}

#[derive(Default)]
pub struct NewAccountBuilder {
    id: Option<AccountId>,
    username: Option<String>,
    email: Option<String>,
    realm: Option<String>,
    password: Option<String>,
    email_verified: bool,
}

impl NewAccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn build(self) -> Result<NewAccount, Error> {
        if self.username.is_none() && self.email.is_none() {
            return Err(ValidationError::MissingField(
                "Username or email is required".to_string(),
            )
            .into());
        }

        Ok(NewAccount {
            id: self.id.unwrap_or_default(),
            username: self.username,
            email: self.email,
            realm: self.realm,
            password: self.password.require_field("Password")?,
            email_verified: self.email_verified,
        })
    }
}
