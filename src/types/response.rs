use serde::Serialize;

use crate::store;

#[derive(Debug, Serialize)]
pub(crate) struct Login {
    pub(crate) username: String,
    pub(crate) token: String,
}

impl Login {
    pub(crate) fn new(username: &str, token: &str) -> Self {
        Self {
            username: username.to_owned(),
            token: token.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AccessToken {
    pub(crate) id: store::TokenId,
    pub(crate) name: String,
    pub(crate) sha1: String,
}

impl From<store::AccessToken> for AccessToken {
    fn from(token: store::AccessToken) -> Self {
        Self {
            id: token.id,
            name: token.name,
            sha1: token.secret,
        }
    }
}
