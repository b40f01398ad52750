use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::views::PageContext;
use presentation::{AppState, DynPostRepository, DynUserRepository};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    if settings.jwt_ttl_seconds.is_none() {
        info!("JWT_TTL_SECONDS is not set: session tokens never expire");
    }
    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));

    let user_repo: DynUserRepository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let post_repo: DynPostRepository = Arc::new(PostgresPostRepository::new(pool));

    let state = AppState::new(
        Arc::new(AuthService::new(user_repo, jwt.clone())),
        Arc::new(BlogService::new(post_repo)),
        jwt,
        Arc::new(PageContext::new(
            settings.admin_layout.clone(),
            settings.site_description.clone(),
        )),
        settings.cookie_secure,
    );

    server::run_http(&settings, state).await
}
