pub(crate) mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::types::AuthorizedUser;

pub(crate) type UserId = i64;
pub(crate) type TokenId = i64;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("access denied")]
    AccessDenied,
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// A personal access token as persisted. The secret is stored as issued and
/// handed back on every listing.
#[derive(Clone, Debug, sqlx::FromRow)]
pub(crate) struct AccessToken {
    pub(crate) id: TokenId,
    pub(crate) uid: UserId,
    pub(crate) name: String,
    pub(crate) secret: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

pub(crate) trait UserDirectory: Clone + Send + Sync + 'static {
    fn get_user_by_name(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<AuthorizedUser, StoreError>> + Send;

    fn get_user_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<AuthorizedUser, StoreError>> + Send;
}

pub(crate) trait TokenStore: Clone + Send + Sync + 'static {
    /// Tokens owned by `owner`, newest first.
    fn list_tokens_by_owner(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<AccessToken>, StoreError>> + Send;

    fn create_token(
        &self,
        owner: UserId,
        name: &str,
    ) -> impl Future<Output = Result<AccessToken, StoreError>> + Send;

    /// Fails with [`StoreError::AccessDenied`] unless a token with `id` owned
    /// by `owner` existed and was removed.
    fn delete_token(
        &self,
        id: TokenId,
        owner: UserId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Resolves a presented secret and records the use.
    fn use_token(
        &self,
        secret: &str,
    ) -> impl Future<Output = Result<Option<AccessToken>, StoreError>> + Send;
}

pub(crate) trait Store: UserDirectory + TokenStore {}

impl<T: UserDirectory + TokenStore> Store for T {}
