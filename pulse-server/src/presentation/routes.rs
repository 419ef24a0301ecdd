use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, register};
use crate::presentation::handlers::comments::{add_comment, delete_comment, update_comment};
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, like_post, list_posts, update_post,
};
use crate::presentation::handlers::users::{get_user, list_users};
use crate::presentation::middleware::auth::bearer_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_router())
        .merge(protected_router(state))
}

fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Every content route requires a resolved identity, matching the original
/// system where even reads go through authentication.
fn protected_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/api/posts/{id}/like", post(like_post))
        .route("/api/posts/{id}/comments", post(add_comment))
        .route(
            "/api/comments/{id}",
            put(update_comment).delete(delete_comment),
        )
        .layer(middleware::from_fn_with_state(
            state,
            bearer_auth_middleware,
        ))
}
