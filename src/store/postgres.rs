use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::core::error::ConfigError;
use crate::store::{AccessToken, StoreError, TokenId, TokenStore, UserDirectory, UserId};
use crate::types::AuthorizedUser;
use crate::utils::secret;

#[derive(Clone, Debug)]
pub(crate) struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub(crate) async fn connect(database_url: &str, max_connections: u32) -> Result<Self, ConfigError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub(crate) async fn migrate(&self) -> Result<(), ConfigError> {
        sqlx::migrate!().run(&self.pool).await?;

        Ok(())
    }
}

impl UserDirectory for PgStore {
    async fn get_user_by_name(&self, username: &str) -> Result<AuthorizedUser, StoreError> {
        match sqlx::query_as::<_, AuthorizedUser>(
            "SELECT id, username, password_hash, is_admin
            FROM users
            WHERE lower(username) = lower($1);",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::RowNotFound) => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Sql(e)),
        }
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<AuthorizedUser, StoreError> {
        match sqlx::query_as::<_, AuthorizedUser>(
            "SELECT id, username, password_hash, is_admin FROM users WHERE id = $1;",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::RowNotFound) => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Sql(e)),
        }
    }
}

impl TokenStore for PgStore {
    async fn list_tokens_by_owner(&self, owner: UserId) -> Result<Vec<AccessToken>, StoreError> {
        let tokens = sqlx::query_as::<_, AccessToken>(
            "SELECT id, uid, name, secret, created_at, updated_at
            FROM access_tokens
            WHERE uid = $1
            ORDER BY id DESC;",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens)
    }

    async fn create_token(&self, owner: UserId, name: &str) -> Result<AccessToken, StoreError> {
        let token = sqlx::query_as::<_, AccessToken>(
            "INSERT INTO access_tokens (uid, name, secret) VALUES ($1, $2, $3) RETURNING
                id,
                uid,
                name,
                secret,
                created_at,
                updated_at;",
        )
        .bind(owner)
        .bind(name)
        .bind(secret::generate())
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    async fn delete_token(&self, id: TokenId, owner: UserId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE id = $1 AND uid = $2;")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            1 => Ok(()),
            _ => Err(StoreError::AccessDenied),
        }
    }

    async fn use_token(&self, secret: &str) -> Result<Option<AccessToken>, StoreError> {
        let token = sqlx::query_as::<_, AccessToken>(
            "UPDATE access_tokens SET updated_at = now() WHERE secret = $1 RETURNING
                id,
                uid,
                name,
                secret,
                created_at,
                updated_at;",
        )
        .bind(secret)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}
