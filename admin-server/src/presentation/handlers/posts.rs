use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest, parse_post_id};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, FormOrJson};
use crate::presentation::middleware::auth::AuthenticatedUser;
use crate::presentation::views::{PageContext, PageDto};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PostFormDto {
    pub(crate) title: String,
    pub(crate) body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DashboardViewDto {
    #[serde(flatten)]
    pub(crate) page: PageDto,
    pub(crate) data: Vec<PostDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct EditPostViewDto {
    #[serde(flatten)]
    pub(crate) page: PageDto,
    pub(crate) data: PostDto,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "posts",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All posts", body = DashboardViewDto),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn dashboard(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<Json<DashboardViewDto>> {
    let posts = state.blog_service.list_posts().await?;

    Ok(Json(DashboardViewDto {
        page: state.pages.page(PageContext::DASHBOARD, "Dashboard"),
        data: posts.into_iter().map(PostDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/add-post",
    tag = "posts",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Create-post page", body = PageDto),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn add_post_page(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Json<PageDto> {
    Json(state.pages.page(PageContext::ADD_POST, "Add post"))
}

#[utoipa::path(
    post,
    path = "/add-post",
    tag = "posts",
    security(("session_cookie" = [])),
    request_body = PostFormDto,
    responses(
        (status = 303, description = "Post created, redirect to /dashboard"),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    FormOrJson(dto): FormOrJson<PostFormDto>,
) -> AppResult<Redirect> {
    let req = CreatePostRequest {
        title: dto.title,
        body: dto.body,
    };

    state.blog_service.create_post(auth.user_id, req).await?;
    Ok(Redirect::to("/dashboard"))
}

#[utoipa::path(
    get,
    path = "/edit-post/{id}",
    tag = "posts",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 200, description = "Post found", body = EditPostViewDto),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn edit_post_page(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<EditPostViewDto>> {
    let id = parse_post_id(&id)?;
    let post = state.blog_service.get_post(id).await?;

    Ok(Json(EditPostViewDto {
        page: state.pages.page(PageContext::EDIT_POST, "Edit post"),
        data: PostDto::from(post),
    }))
}

#[utoipa::path(
    put,
    path = "/edit-post/{id}",
    tag = "posts",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    request_body = PostFormDto,
    responses(
        (status = 303, description = "Post updated (or no such post), redirect to /edit-post/{id}"),
        (status = 400, description = "Invalid id or malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    FormOrJson(dto): FormOrJson<PostFormDto>,
) -> AppResult<Redirect> {
    let id = parse_post_id(&id)?;
    let req = UpdatePostRequest {
        title: dto.title,
        body: dto.body,
    };

    state.blog_service.update_post(auth.user_id, id, req).await?;
    Ok(Redirect::to(&format!("/edit-post/{id}")))
}

#[utoipa::path(
    delete,
    path = "/delete-post/{id}",
    tag = "posts",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 303, description = "Post deleted (or no such post), redirect to /dashboard"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_post_id(&id)?;

    state.blog_service.delete_post(auth.user_id, id).await?;
    Ok(Redirect::to("/dashboard"))
}
