use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::store::{AccessToken, StoreError, TokenId, TokenStore, UserDirectory, UserId};
use crate::types::AuthorizedUser;
use crate::utils::secret;

/// In-process store backing the test suite. Counts every token operation and
/// can be told to fail them, or lookups by name, with an internal error.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    token_calls: Arc<AtomicUsize>,
    broken: Arc<AtomicBool>,
    name_lookup_broken: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<AuthorizedUser>,
    tokens: BTreeMap<TokenId, AccessToken>,
    next_user_id: UserId,
    next_token_id: TokenId,
}

impl MemoryStore {
    pub(crate) async fn add_user(&self, username: &str, password: &str, is_admin: bool) -> AuthorizedUser {
        let mut inner = self.inner.lock().await;
        inner.next_user_id += 1;

        let user = AuthorizedUser {
            id: inner.next_user_id,
            username: username.to_owned(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            is_admin,
        };
        inner.users.push(user.clone());

        user
    }

    pub(crate) fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn break_token_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub(crate) fn break_name_lookup(&self) {
        self.name_lookup_broken.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);

        match self.broken.load(Ordering::SeqCst) {
            true => Err(StoreError::Sql(sqlx::Error::PoolTimedOut)),
            false => Ok(()),
        }
    }
}

impl UserDirectory for MemoryStore {
    async fn get_user_by_name(&self, username: &str) -> Result<AuthorizedUser, StoreError> {
        if self.name_lookup_broken.load(Ordering::SeqCst) {
            return Err(StoreError::Sql(sqlx::Error::PoolTimedOut));
        }

        self.inner
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.username.eq_ignore_ascii_case(username))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<AuthorizedUser, StoreError> {
        self.inner
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

impl TokenStore for MemoryStore {
    async fn list_tokens_by_owner(&self, owner: UserId) -> Result<Vec<AccessToken>, StoreError> {
        self.enter()?;

        Ok(self
            .inner
            .lock()
            .await
            .tokens
            .values()
            .rev()
            .filter(|token| token.uid == owner)
            .cloned()
            .collect())
    }

    async fn create_token(&self, owner: UserId, name: &str) -> Result<AccessToken, StoreError> {
        self.enter()?;

        let mut inner = self.inner.lock().await;
        inner.next_token_id += 1;

        let now = Utc::now();
        let token = AccessToken {
            id: inner.next_token_id,
            uid: owner,
            name: name.to_owned(),
            secret: secret::generate(),
            created_at: now,
            updated_at: now,
        };
        inner.tokens.insert(token.id, token.clone());

        Ok(token)
    }

    async fn delete_token(&self, id: TokenId, owner: UserId) -> Result<(), StoreError> {
        self.enter()?;

        let mut inner = self.inner.lock().await;

        match inner.tokens.get(&id) {
            Some(token) if token.uid == owner => {
                inner.tokens.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::AccessDenied),
        }
    }

    async fn use_token(&self, secret: &str) -> Result<Option<AccessToken>, StoreError> {
        let mut inner = self.inner.lock().await;

        Ok(inner
            .tokens
            .values_mut()
            .find(|token| token.secret == secret)
            .map(|token| {
                token.updated_at = Utc::now();
                token.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_only_the_owners_tokens_newest_first() {
        let store = MemoryStore::default();

        let first = store.create_token(1, "first").await.unwrap();
        store.create_token(2, "other").await.unwrap();
        let second = store.create_token(1, "second").await.unwrap();

        let ids: Vec<_> = store
            .list_tokens_by_owner(1)
            .await
            .unwrap()
            .into_iter()
            .map(|token| token.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn use_token_refreshes_last_use() {
        let store = MemoryStore::default();
        let token = store.create_token(1, "ci").await.unwrap();

        let used = store.use_token(&token.secret).await.unwrap().unwrap();

        assert_eq!(used.id, token.id);
        assert!(used.updated_at >= token.updated_at);
        assert!(store.use_token("nope").await.unwrap().is_none());
    }
}
