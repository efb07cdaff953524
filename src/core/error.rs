use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("User does not exist")]
    UserNotFound,
    #[error("Access token does not belong to user")]
    AccessDenied,
    #[error("Forbidden")]
    Forbidden,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Expired JWT")]
    ExpiredJWT,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("JWT encode error: {0}")]
    JwtEncode(#[source] jsonwebtoken::errors::Error),
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] axum::http::header::ToStrError),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("{operation}: {source}")]
    Internal {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl Error {
    /// Maps a store failure onto the HTTP taxonomy, tagging internal
    /// failures with the operation that produced them.
    pub(crate) fn store(operation: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Error::UserNotFound,
            StoreError::AccessDenied => Error::AccessDenied,
            StoreError::Sql(source) => Error::Internal { operation, source },
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Error::UserNotFound => StatusCode::NOT_FOUND,
            Error::AccessDenied | Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NoCredentials
            | Error::InvalidCredentials
            | Error::ExpiredJWT
            | Error::Unauthorized
            | Error::Jwt(_) => StatusCode::UNAUTHORIZED,
            Error::HeaderDecode(_) => StatusCode::BAD_REQUEST,
            Error::JwtEncode(_) | Error::Bcrypt(_) | Error::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let status = self.status();
        let message = match self {
            Error::UserNotFound => "User does not exist",
            Error::AccessDenied => "You do not have access to this token",
            Error::Forbidden => "Forbidden",
            Error::NoCredentials => "No credentials provided",
            Error::InvalidCredentials => "Invalid credentials",
            Error::ExpiredJWT => "Expired JWT",
            Error::Unauthorized => "Unauthorized",
            Error::Jwt(_) => "Invalid JWT",
            Error::HeaderDecode(_) => "Header decode error",
            Error::JwtEncode(_) => "Internal server error",
            Error::Bcrypt(_) => "Internal server error",
            Error::Internal { .. } => "Internal server error",
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_statuses() {
        assert_eq!(
            Error::store("GetUserByName", StoreError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::store("DeleteAccessToken", StoreError::AccessDenied).status(),
            StatusCode::FORBIDDEN
        );

        let err = Error::store("ListAccessTokens", StoreError::Sql(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("ListAccessTokens: "));
    }

    #[test]
    fn jwt_failures_split_by_side() {
        use jsonwebtoken::errors::ErrorKind;

        assert_eq!(
            Error::Jwt(ErrorKind::InvalidSignature.into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::JwtEncode(ErrorKind::InvalidAlgorithm.into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_their_source() {
        let response = Error::store("NewAccessToken", StoreError::Sql(sqlx::Error::PoolClosed))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body, json!({ "message": "Internal server error" }));
    }
}
