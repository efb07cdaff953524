use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// Body of a token creation request. The name is a free-form label and may be
/// empty.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateAccessTokenOption {
    pub(crate) name: String,
}
