use std::future::Future;

use crate::core::error::Error;
use crate::store::{AccessToken, Store, TokenId, UserDirectory, UserId};
use crate::types::{AuthorizedUser, Username};

/// Something that can name the user whose tokens a request operates on.
pub(crate) trait ResolveOwner: Sync {
    fn resolve<U: UserDirectory>(
        &self,
        users: &U,
    ) -> impl Future<Output = Result<UserId, Error>> + Send;
}

/// Owner named in the request path.
#[derive(Debug)]
pub(crate) struct ByName(pub(crate) Username);

impl ResolveOwner for ByName {
    async fn resolve<U: UserDirectory>(&self, users: &U) -> Result<UserId, Error> {
        users
            .get_user_by_name(&self.0)
            .await
            .map(|user| user.id)
            .map_err(|e| Error::store("GetUserByName", e))
    }
}

/// The caller already bound to the request.
impl ResolveOwner for AuthorizedUser {
    async fn resolve<U: UserDirectory>(&self, _users: &U) -> Result<UserId, Error> {
        Ok(self.id)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TokenController<S: Store> {
    store: S,
}

impl<S: Store> TokenController<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) async fn list<O: ResolveOwner>(&self, owner: &O) -> Result<Vec<AccessToken>, Error> {
        let owner = owner.resolve(&self.store).await?;

        self.store
            .list_tokens_by_owner(owner)
            .await
            .map_err(|e| Error::store("ListAccessTokens", e))
    }

    pub(crate) async fn create<O: ResolveOwner>(
        &self,
        owner: &O,
        name: &str,
    ) -> Result<AccessToken, Error> {
        let owner = owner.resolve(&self.store).await?;

        let token = self
            .store
            .create_token(owner, name)
            .await
            .map_err(|e| Error::store("NewAccessToken", e))?;

        tracing::info!(owner, token = token.id, "access token created");

        Ok(token)
    }

    pub(crate) async fn delete<O: ResolveOwner>(&self, owner: &O, id: TokenId) -> Result<(), Error> {
        let owner = owner.resolve(&self.store).await?;

        self.store
            .delete_token(id, owner)
            .await
            .map_err(|e| Error::store("DeleteAccessToken", e))?;

        tracing::info!(owner, token = id, "access token deleted");

        Ok(())
    }
}
