//! Credential normalization
//!
//! Turns raw login input into the exact-match query run against the account
//! directory. Normalization is pure: no directory or store access happens here.
//!
//! With a realm delimiter of `/`, `tenantA/alice` becomes
//! `{ realm: "tenantA", username: "alice" }`. Without realms the principal is
//! copied verbatim.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Raw login input
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub realm: Option<String>,
    /// Requested token lifetime in seconds
    pub ttl: Option<u64>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("realm", &self.realm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Credentials {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Identifier without a password, as used by password reset
    pub fn for_email(email: impl Into<String>) -> Self {
        Self::with_email(email, "")
    }

    pub fn for_username(username: impl Into<String>) -> Self {
        Self::with_username(username, "")
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Exact-match lookup key for the account directory.
///
/// At most one of `email` / `username` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

impl NormalizedQuery {
    pub fn has_principal(&self) -> bool {
        self.email.is_some() || self.username.is_some()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Split `realm<delimiter>principal` on the first occurrence of the delimiter.
fn split_principal<'a>(name: &'a str, delimiter: Option<&str>) -> (Option<&'a str>, &'a str) {
    match delimiter.filter(|d| !d.is_empty()) {
        Some(delimiter) => match name.split_once(delimiter) {
            Some((realm, principal)) => (Some(realm), principal),
            None => (None, name),
        },
        None => (None, name),
    }
}

/// Build the directory query for a set of credentials.
///
/// Email wins over username when both are supplied. With `realm_required`,
/// a realm prefix split off the principal overrides `credentials.realm`
/// (an empty prefix does not).
pub fn normalize(
    credentials: &Credentials,
    realm_required: bool,
    realm_delimiter: Option<&str>,
) -> NormalizedQuery {
    let mut query = NormalizedQuery::default();

    if !realm_required {
        if let Some(email) = present(&credentials.email) {
            query.email = Some(email.to_string());
        } else if let Some(username) = present(&credentials.username) {
            query.username = Some(username.to_string());
        }
        return query;
    }

    query.realm = present(&credentials.realm).map(str::to_string);

    let principal = if let Some(email) = present(&credentials.email) {
        Some((email, true))
    } else {
        present(&credentials.username).map(|username| (username, false))
    };

    if let Some((name, is_email)) = principal {
        let (realm, principal) = split_principal(name, realm_delimiter);
        if let Some(realm) = realm.and_then(non_empty) {
            query.realm = Some(realm);
        }
        if is_email {
            query.email = non_empty(principal);
        } else {
            query.username = non_empty(principal);
        }
    }

    query
}

/// Lowercased set of relations the caller wants attached to a login result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeOptions(BTreeSet<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum IncludeInput {
    One(String),
    Many(Vec<String>),
}

impl IncludeOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn user() -> Self {
        Self::from("user")
    }

    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains(&relation.to_lowercase())
    }

    /// Whether the resolved account should be attached to the token
    pub fn wants_user(&self) -> bool {
        self.contains("user")
    }
}

impl From<&str> for IncludeOptions {
    /// A single relation, or a comma separated list of them
    fn from(value: &str) -> Self {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IncludeOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for IncludeOptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match IncludeInput::deserialize(deserializer)? {
            IncludeInput::One(value) => IncludeOptions::from(value.as_str()),
            IncludeInput::Many(values) => values.into_iter().collect(),
        })
    }
}
