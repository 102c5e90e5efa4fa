use async_trait::async_trait;
use dashmap::DashMap;
use warden_core::{AccountId, Error, SessionToken, TokenId, repositories::SessionStore};

/// Session store kept in process memory. Expired tokens are left in place;
/// callers check expiry and destroy them.
#[derive(Default)]
pub struct MemorySessionStore {
    tokens: DashMap<TokenId, SessionToken>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drop every expired token, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| !token.is_expired());
        let purged = before.saturating_sub(self.tokens.len());
        if purged > 0 {
            tracing::debug!(purged, "purged expired access tokens");
        }
        purged
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, account_id: &AccountId, ttl: u64) -> Result<SessionToken, Error> {
        let token = SessionToken::new(account_id.clone(), ttl);
        self.tokens.insert(token.id.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_id(&self, id: &TokenId) -> Result<Option<SessionToken>, Error> {
        Ok(self.tokens.get(id).map(|entry| entry.value().clone()))
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), Error> {
        self.tokens.remove(&token.id);
        Ok(())
    }

    async fn destroy_for_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.tokens.retain(|_, token| &token.user_id != account_id);
        Ok(())
    }
}
