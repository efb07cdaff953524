use axum::extract::{Extension, Json, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::store::{Store, TokenId};
use crate::types::{AuthorizedUser, request, response};

// GET /user/tokens
#[instrument(skip_all, fields(user = %user.username))]
pub(crate) async fn list_tokens<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthorizedUser>,
) -> Result<Json<Vec<response::AccessToken>>, Error> {
    let tokens = state.token_controller.list(&user).await?;

    Ok(Json(tokens.into_iter().map(Into::into).collect()))
}

// POST /user/tokens
#[instrument(skip_all, fields(user = %user.username))]
pub(crate) async fn create_token<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthorizedUser>,
    Json(params): Json<request::CreateAccessTokenOption>,
) -> Result<(StatusCode, Json<response::AccessToken>), Error> {
    let token = state.token_controller.create(&user, &params.name).await?;

    Ok((StatusCode::CREATED, Json(token.into())))
}

// DELETE /user/tokens/{id}
#[instrument(skip_all, fields(user = %user.username, id = id))]
pub(crate) async fn delete_token<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthorizedUser>,
    Path(id): Path<TokenId>,
) -> Result<StatusCode, Error> {
    state.token_controller.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
