use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::store::Store;
use crate::types::{request, response};

#[instrument(skip_all, fields(username = %user_data.username))]
pub(crate) async fn login<S: Store>(
    State(state): State<AppState<S>>,
    Json(user_data): Json<request::LoginData>,
) -> Result<Json<response::Login>, Error> {
    let (user, token) = state
        .user_controller
        .login(&user_data.username, &user_data.password)
        .await?;

    Ok(Json(response::Login::new(&user.username, &token)))
}
