use crate::{
    Error,
    account::AccountId,
    session::{SessionToken, TokenId},
};
use async_trait::async_trait;

/// The external store of issued access tokens
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Create a token for an account with a lifetime in seconds
    async fn create(&self, account_id: &AccountId, ttl: u64) -> Result<SessionToken, Error>;

    /// Find a token by id
    async fn find_by_id(&self, id: &TokenId) -> Result<Option<SessionToken>, Error>;

    /// Destroy a token
    async fn destroy(&self, token: &SessionToken) -> Result<(), Error>;

    /// Destroy every token issued for an account
    async fn destroy_for_account(&self, account_id: &AccountId) -> Result<(), Error>;
}
