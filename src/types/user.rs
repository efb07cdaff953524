use serde::{Deserialize, Serialize};

use crate::store::UserId;

pub(crate) type Username = String;

#[derive(Clone, sqlx::FromRow)]
pub(crate) struct AuthorizedUser {
    pub(crate) id: UserId,
    pub(crate) username: Username,
    pub(crate) password_hash: String,
    pub(crate) is_admin: bool,
}

impl std::fmt::Debug for AuthorizedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) exp: usize,
    pub(crate) iat: usize,
    pub(crate) sub: String,
    pub(crate) iss: String,
}
