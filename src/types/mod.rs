pub(crate) mod request;
pub(crate) mod response;
mod user;

pub(crate) use user::{AuthorizedUser, Claims, Username};
