use axum::{Router, routing::get};

use super::AppState;
use super::handlers::health::healthz;

pub(crate) mod auth;
pub(crate) mod posts;

pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(auth::router())
        .merge(posts::router(state.clone()))
        .with_state(state)
}
