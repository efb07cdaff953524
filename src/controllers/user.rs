use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};

use crate::core::error::Error;
use crate::store::{Store, StoreError};
use crate::types::{AuthorizedUser, Claims};

const ISSUER: &str = "gitkeys";

/// Credentials presented in an `Authorization` header.
#[derive(PartialEq, Eq)]
pub(crate) enum Credentials {
    Jwt(String),
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Jwt(_) => f.write_str("Jwt(..)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(..)"),
        }
    }
}

#[derive(Clone)]
pub(crate) struct UserController<S: Store> {
    store: S,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl<S: Store> std::fmt::Debug for UserController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController").finish_non_exhaustive()
    }
}

impl<S: Store> UserController<S> {
    pub(crate) fn new(store: S, jwt_secret: &str) -> Self {
        Self {
            store,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AuthorizedUser, String), Error> {
        let user = match self.store.get_user_by_name(username).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(Error::InvalidCredentials),
            Err(e) => return Err(Error::store("GetUserByName", e)),
        };

        if let false = bcrypt::verify(password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        };

        let token = self.encode_jwt(&user)?;

        Ok((user, token))
    }

    pub(crate) async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<AuthorizedUser, Error> {
        let found = match credentials {
            Credentials::Jwt(token) => {
                let token_data = self.decode_jwt(&token)?;

                self.store.get_user_by_name(&token_data.claims.sub).await
            }
            Credentials::AccessToken(secret) => {
                let token = self
                    .store
                    .use_token(&secret)
                    .await
                    .map_err(|e| Error::store("GetAccessTokenBySecret", e))?
                    .ok_or(Error::Unauthorized)?;

                tracing::debug!(
                    token = token.id,
                    created_at = %token.created_at,
                    last_used = %token.updated_at,
                    "access token used"
                );

                self.store.get_user_by_id(token.uid).await
            }
        };

        match found {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => Err(Error::Unauthorized),
            Err(e) => Err(Error::store("GetUser", e)),
        }
    }

    pub(crate) fn encode_jwt(&self, user: &AuthorizedUser) -> Result<String, Error> {
        let current_time = Utc::now();
        let expiration_time = current_time + Duration::days(1);

        let exp = expiration_time.timestamp() as usize;
        let iat = current_time.timestamp() as usize;

        let claims = Claims {
            exp,
            iat,
            sub: user.username.to_string(),
            iss: ISSUER.into(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(Error::JwtEncode)
    }

    pub(crate) fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, Error> {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(token_data) => Ok(token_data),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(Error::ExpiredJWT),
                _ => Err(Error::Jwt(e)),
            },
        }
    }
}
