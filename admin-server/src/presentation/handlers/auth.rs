use axum::{Json, extract::State, http::StatusCode, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, FormOrJson};
use crate::presentation::middleware::auth::SESSION_COOKIE;
use crate::presentation::views::{PageContext, PageDto};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RegisterDto {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RegisterResponseDto {
    pub(crate) message: String,
    pub(crate) user: UserDto,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/admins",
    tag = "auth",
    responses(
        (status = 200, description = "Login page", body = PageDto)
    )
)]
pub(crate) async fn login_page(State(state): State<AppState>) -> Json<PageDto> {
    Json(state.pages.page(PageContext::LOGIN, "Admin"))
}

#[utoipa::path(
    post,
    path = "/admins",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 303, description = "Session cookie set, redirect to /dashboard"),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    FormOrJson(dto): FormOrJson<LoginDto>,
) -> AppResult<(CookieJar, Redirect)> {
    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    debug!(user_id = %result.user.id, "session cookie issued");

    let cookie = Cookie::build((SESSION_COOKIE, result.access_token))
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User created", body = RegisterResponseDto),
        (status = 400, description = "Empty username or password, or malformed body"),
        (status = 409, description = "Username already in use"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    FormOrJson(dto): FormOrJson<RegisterDto>,
) -> AppResult<(StatusCode, Json<RegisterResponseDto>)> {
    let req = RegisterRequest {
        username: dto.username,
        password: dto.password,
    };

    let user = state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponseDto {
            message: "user created".to_string(),
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cookie cleared, redirect to /")
    )
)]
pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    // просроченную cookie отдаём всегда, даже если запрос пришёл без сессии
    let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    removal.make_removal();
    (jar.add(removal), Redirect::to("/"))
}
