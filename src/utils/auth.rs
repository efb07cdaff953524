use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};

use crate::controllers::user::Credentials;
use crate::core::error::Error;
use crate::core::state::AppState;
use crate::store::Store;
use crate::types::AuthorizedUser;

/// Reads `Authorization: Bearer <jwt>` or `Authorization: token <secret>`.
pub(crate) fn credentials(headers: &HeaderMap) -> Result<Credentials, Error> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let mut header = header.to_str()?.split_whitespace();

    match (header.next(), header.next(), header.next()) {
        (Some(scheme), Some(value), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(Credentials::Jwt(value.to_owned()))
        }
        (Some(scheme), Some(value), None) if scheme.eq_ignore_ascii_case("token") => {
            Ok(Credentials::AccessToken(value.to_owned()))
        }
        _ => Err(Error::Unauthorized),
    }
}

pub(crate) async fn authorize<S: Store>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let credentials = credentials(request.headers())?;

    let user = state.user_controller.authenticate(credentials).await?;

    tracing::debug!(user = %user.username, "authenticated");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

pub(crate) async fn require_admin(
    Extension(user): Extension<AuthorizedUser>,
    request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    if !user.is_admin {
        return Err(Error::Forbidden);
    }

    Ok(next.run(request).await)
}
