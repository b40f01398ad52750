use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{LoginDto, RegisterDto, RegisterResponseDto, UserDto};
use crate::presentation::handlers::health::HealthDto;
use crate::presentation::handlers::posts::{
    DashboardViewDto, EditPostViewDto, PostDto, PostFormDto,
};
use crate::presentation::middleware::auth::SESSION_COOKIE;
use crate::presentation::views::{LocalsDto, PageDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::health::healthz,
        crate::presentation::handlers::auth::login_page,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::posts::dashboard,
        crate::presentation::handlers::posts::add_post_page,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::edit_post_page,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post
    ),
    components(
        schemas(
            HealthDto,
            LoginDto,
            RegisterDto,
            RegisterResponseDto,
            UserDto,
            PostFormDto,
            PostDto,
            LocalsDto,
            PageDto,
            DashboardViewDto,
            EditPostViewDto
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Login, registration and logout"),
        (name = "posts", description = "Post administration")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        openapi.components = Some(components);
    }
}
