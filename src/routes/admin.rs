use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::controllers::token::ByName;
use crate::core::error::Error;
use crate::core::state::AppState;
use crate::store::{Store, TokenId};
use crate::types::{Username, request, response};

// GET /admin/users/{username}/tokens
#[instrument(skip(state))]
pub(crate) async fn list_tokens<S: Store>(
    State(state): State<AppState<S>>,
    Path(username): Path<Username>,
) -> Result<Json<Vec<response::AccessToken>>, Error> {
    let tokens = state.token_controller.list(&ByName(username)).await?;

    Ok(Json(tokens.into_iter().map(Into::into).collect()))
}

// POST /admin/users/{username}/tokens
#[instrument(skip(state))]
pub(crate) async fn create_token<S: Store>(
    State(state): State<AppState<S>>,
    Path(username): Path<Username>,
    Json(params): Json<request::CreateAccessTokenOption>,
) -> Result<(StatusCode, Json<response::AccessToken>), Error> {
    let token = state
        .token_controller
        .create(&ByName(username), &params.name)
        .await?;

    Ok((StatusCode::CREATED, Json(token.into())))
}

// DELETE /admin/users/{username}/tokens/{id}
#[instrument(skip(state))]
pub(crate) async fn delete_token<S: Store>(
    State(state): State<AppState<S>>,
    Path((username, id)): Path<(Username, TokenId)>,
) -> Result<StatusCode, Error> {
    state
        .token_controller
        .delete(&ByName(username), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
