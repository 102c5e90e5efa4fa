use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use warden_core::{
    Account, AccountId, Error, NewAccount, NormalizedQuery,
    error::{AuthError, StorageError},
    repositories::AccountDirectory,
};

use crate::password::{hash_password, verify_password};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PrincipalKind {
    Email,
    Username,
}

/// Uniqueness key: a principal is unique within its realm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PrincipalKey {
    realm: Option<String>,
    kind: PrincipalKind,
    value: String,
}

fn principal_keys(
    realm: &Option<String>,
    email: &Option<String>,
    username: &Option<String>,
) -> Vec<PrincipalKey> {
    let email = email.iter().map(|value| PrincipalKey {
        realm: realm.clone(),
        kind: PrincipalKind::Email,
        value: value.clone(),
    });
    let username = username.iter().map(|value| PrincipalKey {
        realm: realm.clone(),
        kind: PrincipalKind::Username,
        value: value.clone(),
    });
    email.chain(username).collect()
}

/// Realm is part of the key: a query without a realm only sees realm-less
/// accounts, so at most one account can match.
fn matches(account: &Account, query: &NormalizedQuery) -> bool {
    query.has_principal()
        && (query.email.is_none() || account.email == query.email)
        && (query.username.is_none() || account.username == query.username)
        && account.realm == query.realm
}

/// Account directory kept in process memory.
///
/// Usernames and emails are unique per realm. Principals are fixed at
/// creation; `save` refuses to change them.
#[derive(Default)]
pub struct MemoryAccountDirectory {
    accounts: DashMap<AccountId, Account>,
    principals: DashMap<PrincipalKey, AccountId>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn reserve(&self, keys: &[PrincipalKey], id: &AccountId) -> Result<(), Error> {
        for (i, key) in keys.iter().enumerate() {
            // the entry guard holds a shard lock and must be gone before rolling back
            let taken = match self.principals.entry(key.clone()) {
                Entry::Occupied(_) => true,
                Entry::Vacant(slot) => {
                    slot.insert(id.clone());
                    false
                }
            };
            if taken {
                for reserved in &keys[..i] {
                    self.principals.remove(reserved);
                }
                return Err(AuthError::UserAlreadyExists.into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_one(&self, query: &NormalizedQuery) -> Result<Option<Account>, Error> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| matches(entry.value(), query))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        Ok(self.accounts.get(id).map(|entry| entry.value().clone()))
    }

    async fn compare_password(&self, account: &Account, plaintext: &str) -> Result<bool, Error> {
        verify_password(plaintext, &account.password_hash)
    }

    async fn save(&self, account: &Account) -> Result<Account, Error> {
        let mut stored = self
            .accounts
            .get_mut(&account.id)
            .ok_or(StorageError::NotFound)?;

        if stored.email != account.email
            || stored.username != account.username
            || stored.realm != account.realm
        {
            return Err(StorageError::Constraint(
                "principals cannot be changed after creation".to_string(),
            )
            .into());
        }

        let mut updated = account.clone();
        // the directory owns the hash; callers cannot overwrite it through save
        updated.password_hash = stored.password_hash.clone();
        updated.updated_at = Utc::now();
        *stored = updated.clone();

        Ok(updated)
    }

    async fn create(&self, account: NewAccount, salt_work_factor: u32) -> Result<Account, Error> {
        if self.accounts.contains_key(&account.id) {
            return Err(StorageError::Constraint(format!(
                "account id {} already in use",
                account.id
            ))
            .into());
        }

        let password_hash = hash_password(&account.password, salt_work_factor)?;
        let keys = principal_keys(&account.realm, &account.email, &account.username);
        self.reserve(&keys, &account.id)?;

        let created = Account::builder()
            .id(account.id)
            .username(account.username)
            .email(account.email)
            .realm(account.realm)
            .password_hash(password_hash)
            .email_verified(account.email_verified)
            .build();
        let created = match created {
            Ok(created) => created,
            Err(e) => {
                for key in &keys {
                    self.principals.remove(key);
                }
                return Err(e);
            }
        };

        self.accounts.insert(created.id.clone(), created.clone());
        tracing::debug!(user.id = %created.id, "created account in memory directory");
        Ok(created)
    }

    async fn set_password(
        &self,
        id: &AccountId,
        plaintext: &str,
        salt_work_factor: u32,
    ) -> Result<(), Error> {
        let password_hash = hash_password(plaintext, salt_work_factor)?;
        let mut stored = self.accounts.get_mut(id).ok_or(StorageError::NotFound)?;
        stored.password_hash = password_hash;
        stored.updated_at = Utc::now();
        Ok(())
    }
}
