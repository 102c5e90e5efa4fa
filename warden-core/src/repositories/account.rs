use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    credentials::NormalizedQuery,
};
use async_trait::async_trait;

/// The external store of identity records.
///
/// Password hashing at rest belongs to the directory: warden only hands it
/// plaintext to compare or store, together with the configured work factor.
#[async_trait]
pub trait AccountDirectory: Send + Sync + 'static {
    /// Find the single account matching every populated principal of `query`.
    ///
    /// The realm always takes part in the match: `realm: None` only matches
    /// accounts without a realm.
    async fn find_one(&self, query: &NormalizedQuery) -> Result<Option<Account>, Error>;

    /// Find an account by ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Compare a plaintext password against the account's stored hash
    async fn compare_password(&self, account: &Account, plaintext: &str) -> Result<bool, Error>;

    /// Persist changes to an existing account
    async fn save(&self, account: &Account) -> Result<Account, Error>;

    /// Create a new account, hashing its password
    async fn create(&self, account: NewAccount, salt_work_factor: u32) -> Result<Account, Error>;

    /// Replace an account's password
    async fn set_password(
        &self,
        id: &AccountId,
        plaintext: &str,
        salt_work_factor: u32,
    ) -> Result<(), Error>;
}
