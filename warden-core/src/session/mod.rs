//! Access tokens
//!
//! Access tokens are owned by the session store. A token is created on a
//! successful login (or a password reset request) and looked up / destroyed
//! on logout. The core token struct is defined as follows:
//!
//! | Field        | Type        | Description                                      |
//! | ------------ | ----------- | ------------------------------------------------ |
//! | `id`         | `TokenId`   | The opaque token handed to the client.           |
//! | `ttl`        | `u64`       | Lifetime in seconds, already clamped to max TTL. |
//! | `user_id`    | `AccountId` | The account the token was issued for.            |
//! | `created_at` | `DateTime`  | The timestamp when the token was created.        |
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{account::Account, account::AccountId, crypto::generate_secure_token};

/// Opaque access token id with at least 256 bits of entropy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: &str) -> Self {
        TokenId(id.to_string())
    }

    pub fn new_random() -> Self {
        TokenId(generate_secure_token())
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// TODO: wrap in a secrecy string so tokens stop showing up in Debug output
impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub id: TokenId,

    /// Lifetime in seconds
    pub ttl: u64,

    pub user_id: AccountId,

    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl SessionToken {
    /// A fresh token for `user_id`, created now
    pub fn new(user_id: AccountId, ttl: u64) -> Self {
        Self {
            id: TokenId::new_random(),
            ttl,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl).unwrap_or(i64::MAX);
        Duration::try_seconds(ttl)
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at()
    }
}

/// The result of a successful login.
///
/// The account is attached as auxiliary data only when the caller asked for
/// it (`include=user`); it is never written back to the session store.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    #[serde(flatten)]
    pub token: SessionToken,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,
}

impl IssuedToken {
    pub fn id(&self) -> &TokenId {
        &self.token.id
    }
}
