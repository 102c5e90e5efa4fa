//! In-test collaborators with failure injection and call counters
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    credentials::NormalizedQuery,
    error::{AuthError, StorageError},
    repositories::{AccountDirectory, SessionStore},
    session::{SessionToken, TokenId},
};

fn mock_hash(plaintext: &str) -> String {
    format!("plain:{plaintext}")
}

#[derive(Default)]
pub struct MockDirectory {
    pub accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    pub lookups: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_lookup: AtomicBool,
    pub fail_compare: AtomicBool,
    pub fail_save: AtomicBool,
}

impl MockDirectory {
    pub async fn insert(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        realm: Option<&str>,
        password: &str,
        email_verified: bool,
    ) -> Account {
        let account = Account::builder()
            .username(username.map(str::to_string))
            .email(email.map(str::to_string))
            .realm(realm.map(str::to_string))
            .password_hash(mock_hash(password))
            .email_verified(email_verified)
            .build()
            .unwrap();
        self.accounts
            .lock()
            .await
            .insert(account.id.clone(), account.clone());
        account
    }

    pub async fn get(&self, id: &AccountId) -> Account {
        self.accounts.lock().await.get(id).cloned().unwrap()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

fn matches(account: &Account, query: &NormalizedQuery) -> bool {
    (query.email.is_none() || account.email == query.email)
        && (query.username.is_none() || account.username == query.username)
        && account.realm == query.realm
}

#[async_trait]
impl AccountDirectory for MockDirectory {
    async fn find_one(&self, query: &NormalizedQuery) -> Result<Option<Account>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("directory unreachable".to_string()).into());
        }
        Ok(self
            .accounts
            .lock()
            .await
            .values()
            .find(|account| matches(account, query))
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("directory unreachable".to_string()).into());
        }
        Ok(self.accounts.lock().await.get(id).cloned())
    }

    async fn compare_password(&self, account: &Account, plaintext: &str) -> Result<bool, Error> {
        if self.fail_compare.load(Ordering::SeqCst) {
            return Err(StorageError::Directory("hash comparison failed".to_string()).into());
        }
        Ok(account.password_hash == mock_hash(plaintext))
    }

    async fn save(&self, account: &Account) -> Result<Account, Error> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StorageError::Directory("save refused".to_string()).into());
        }
        self.accounts
            .lock()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(account.clone())
    }

    async fn create(&self, account: NewAccount, _salt_work_factor: u32) -> Result<Account, Error> {
        let mut accounts = self.accounts.lock().await;
        let taken = accounts.values().any(|existing| {
            existing.realm == account.realm
                && ((account.email.is_some() && existing.email == account.email)
                    || (account.username.is_some() && existing.username == account.username))
        });
        if taken {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let created = Account::builder()
            .id(account.id)
            .username(account.username)
            .email(account.email)
            .realm(account.realm)
            .password_hash(mock_hash(&account.password))
            .email_verified(account.email_verified)
            .build()?;
        accounts.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn set_password(
        &self,
        id: &AccountId,
        plaintext: &str,
        _salt_work_factor: u32,
    ) -> Result<(), Error> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts.get_mut(id).ok_or(StorageError::NotFound)?;
        account.password_hash = mock_hash(plaintext);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSessionStore {
    pub tokens: Arc<Mutex<HashMap<TokenId, SessionToken>>>,
    pub fail_create: AtomicBool,
    pub fail_destroy: AtomicBool,
}

impl MockSessionStore {
    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create(&self, account_id: &AccountId, ttl: u64) -> Result<SessionToken, Error> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StorageError::SessionStore("tokens table unreachable".to_string()).into());
        }
        let token = SessionToken::new(account_id.clone(), ttl);
        self.tokens
            .lock()
            .await
            .insert(token.id.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_id(&self, id: &TokenId) -> Result<Option<SessionToken>, Error> {
        Ok(self.tokens.lock().await.get(id).cloned())
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), Error> {
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(StorageError::SessionStore("destroy refused".to_string()).into());
        }
        self.tokens.lock().await.remove(&token.id);
        Ok(())
    }

    async fn destroy_for_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.tokens
            .lock()
            .await
            .retain(|_, token| &token.user_id != account_id);
        Ok(())
    }
}
