use tracing::{debug, info};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        actor_user_id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let new_post = NewPost {
            title: req.title,
            body: req.body,
        };
        let post = self.repo.create_post(new_post).await?;

        info!(post_id = %post.id, actor = %actor_user_id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: Uuid,
        post_id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<(), DomainError> {
        let patch = PostPatch {
            title: req.title,
            body: req.body,
        };

        if self.repo.update_post(post_id, patch).await? {
            info!(post_id = %post_id, actor = %actor_user_id, "post updated");
        } else {
            debug!(post_id = %post_id, "update matched no post");
        }
        Ok(())
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), DomainError> {
        if self.repo.delete_post(post_id).await? {
            info!(post_id = %post_id, actor = %actor_user_id, "post deleted");
        } else {
            debug!(post_id = %post_id, "delete matched no post");
        }
        Ok(())
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::BlogService;
    use crate::data::repositories::memory::InMemoryPostRepository;
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, UpdatePostRequest};

    fn create_req(title: &str, body: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn update_req(title: &str, body: &str) -> UpdatePostRequest {
        UpdatePostRequest {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() {
        let service = BlogService::new(InMemoryPostRepository::new());
        let actor = Uuid::new_v4();

        let created = service
            .create_post(actor, create_req("T", "B"))
            .await
            .expect("create_post must succeed");
        let fetched = service
            .get_post(created.id)
            .await
            .expect("get_post must succeed");

        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.body, "B");
        assert_eq!(fetched.created_at, created.created_at);
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[tokio::test]
    async fn create_accepts_empty_fields() {
        let service = BlogService::new(InMemoryPostRepository::new());

        let created = service
            .create_post(Uuid::new_v4(), create_req("", ""))
            .await
            .expect("empty post must be accepted");
        assert!(created.title.is_empty());
        assert!(created.body.is_empty());
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let service = BlogService::new(InMemoryPostRepository::new());

        let err = service
            .get_post(Uuid::new_v4())
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn repeated_identical_update_keeps_fields_and_advances_updated_at() {
        let repo = InMemoryPostRepository::new();
        let service = BlogService::new(repo.clone());
        let actor = Uuid::new_v4();
        let post = service
            .create_post(actor, create_req("old", "old body"))
            .await
            .expect("create_post must succeed");

        service
            .update_post(actor, post.id, update_req("new", "new body"))
            .await
            .expect("first update must succeed");
        let first = repo.snapshot(post.id).expect("post must exist");

        service
            .update_post(actor, post.id, update_req("new", "new body"))
            .await
            .expect("second update must succeed");
        let second = repo.snapshot(post.id).expect("post must exist");

        assert_eq!(second.title, "new");
        assert_eq!(second.body, "new body");
        assert_eq!(first.title, second.title);
        assert_eq!(first.body, second.body);
        assert!(first.updated_at >= post.updated_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.created_at, post.created_at);
    }

    #[tokio::test]
    async fn update_missing_post_is_a_no_op() {
        let repo = InMemoryPostRepository::new();
        let service = BlogService::new(repo.clone());

        service
            .update_post(Uuid::new_v4(), Uuid::new_v4(), update_req("t", "b"))
            .await
            .expect("update of missing post must not fail");
        assert!(service.list_posts().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_removes_post_and_tolerates_missing_id() {
        let service = BlogService::new(InMemoryPostRepository::new());
        let actor = Uuid::new_v4();
        let post = service
            .create_post(actor, create_req("t", "b"))
            .await
            .expect("create_post must succeed");

        service
            .delete_post(actor, post.id)
            .await
            .expect("delete must succeed");
        service
            .delete_post(actor, post.id)
            .await
            .expect("second delete must be a no-op");

        let err = service.get_post(post.id).await.expect_err("post is gone");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_posts_returns_everything() {
        let service = BlogService::new(InMemoryPostRepository::new());
        let actor = Uuid::new_v4();
        for i in 0..3 {
            service
                .create_post(actor, create_req(&format!("post {i}"), "body"))
                .await
                .expect("create_post must succeed");
        }

        let posts = service.list_posts().await.expect("list must succeed");
        assert_eq!(posts.len(), 3);
    }
}
