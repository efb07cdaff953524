use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::state::AppState;
use crate::routes::{admin, auth, user};
use crate::store::Store;
use crate::utils;

pub(crate) fn routes<S: Store>(state: AppState<S>) -> Router {
    // /admin/...
    let admin_router = Router::new()
        .route(
            "/users/{username}/tokens",
            get(admin::list_tokens::<S>).post(admin::create_token::<S>),
        )
        .route(
            "/users/{username}/tokens/{id}",
            delete(admin::delete_token::<S>),
        )
        .route_layer(middleware::from_fn(utils::auth::require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize::<S>,
        ));

    // /user/...
    let user_router = Router::new()
        .route(
            "/tokens",
            get(user::list_tokens::<S>).post(user::create_token::<S>),
        )
        .route("/tokens/{id}", delete(user::delete_token::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize::<S>,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .route("/login", post(auth::login::<S>))
        .nest("/admin", admin_router)
        .nest("/user", user_router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::DELETE])
                        .allow_origin(cors::Any),
                ),
        )
}
