use axum::Router;
use axum::middleware;
use axum::routing::{delete, get};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    add_post_page, create_post, dashboard, delete_post, edit_post_page, update_post,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add-post", get(add_post_page).post(create_post))
        .route("/edit-post/{id}", get(edit_post_page).put(update_post))
        .route("/delete-post/{id}", delete(delete_post))
        .route_layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ))
}
