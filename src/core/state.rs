use crate::controllers::token::TokenController;
use crate::controllers::user::UserController;
use crate::store::Store;

#[derive(Clone, Debug)]
pub(crate) struct AppState<S: Store> {
    pub(crate) user_controller: UserController<S>,
    pub(crate) token_controller: TokenController<S>,
}

impl<S: Store> AppState<S> {
    pub(crate) fn new(store: S, secret: &str) -> Self {
        AppState {
            user_controller: UserController::new(store.clone(), secret),
            token_controller: TokenController::new(store),
        }
    }
}
