use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    credentials::NormalizedQuery,
    repositories::{AccountDirectory, RepositoryProvider, SessionStore},
    session::{SessionToken, TokenId},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Adapter that exposes a provider's account directory as an owned `AccountDirectory`
pub struct AccountDirectoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AccountDirectoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AccountDirectory for AccountDirectoryAdapter<R> {
    async fn find_one(&self, query: &NormalizedQuery) -> Result<Option<Account>, Error> {
        self.provider.directory().find_one(query).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.provider.directory().find_by_id(id).await
    }

    async fn compare_password(&self, account: &Account, plaintext: &str) -> Result<bool, Error> {
        self.provider
            .directory()
            .compare_password(account, plaintext)
            .await
    }

    async fn save(&self, account: &Account) -> Result<Account, Error> {
        self.provider.directory().save(account).await
    }

    async fn create(&self, account: NewAccount, salt_work_factor: u32) -> Result<Account, Error> {
        self.provider
            .directory()
            .create(account, salt_work_factor)
            .await
    }

    async fn set_password(
        &self,
        id: &AccountId,
        plaintext: &str,
        salt_work_factor: u32,
    ) -> Result<(), Error> {
        self.provider
            .directory()
            .set_password(id, plaintext, salt_work_factor)
            .await
    }
}

/// Adapter that exposes a provider's session store as an owned `SessionStore`
pub struct SessionStoreAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> SessionStoreAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> SessionStore for SessionStoreAdapter<R> {
    async fn create(&self, account_id: &AccountId, ttl: u64) -> Result<SessionToken, Error> {
        self.provider.sessions().create(account_id, ttl).await
    }

    async fn find_by_id(&self, id: &TokenId) -> Result<Option<SessionToken>, Error> {
        self.provider.sessions().find_by_id(id).await
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), Error> {
        self.provider.sessions().destroy(token).await
    }

    async fn destroy_for_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.provider.sessions().destroy_for_account(account_id).await
    }
}
