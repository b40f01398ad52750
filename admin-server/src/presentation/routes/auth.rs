use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, login_page, logout, register};

// Регистрация открыта: любой может создать себе учётку администратора.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/admins", get(login_page).post(login))
        .route("/register", post(register))
        .route("/logout", get(logout))
}
