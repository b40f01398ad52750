use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;


pub(crate) type DynUserRepository = Arc<dyn UserRepository>;
pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<DynUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<DynPostRepository>>,
    pub(crate) jwt: Arc<JwtService>,
    pub(crate) pages: Arc<views::PageContext>,
    pub(crate) cookie_secure: bool,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<DynUserRepository>>,
        blog_service: Arc<BlogService<DynPostRepository>>,
        jwt: Arc<JwtService>,
        pages: Arc<views::PageContext>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
            jwt,
            pages,
            cookie_secure,
        }
    }
}
