use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) body: String,
}

// updated_at ставит хранилище, а не вызывающий код
#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) body: String,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError>;
    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
}

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).create_post(input).await
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        (**self).get_post(id).await
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError> {
        (**self).update_post(id, patch).await
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        (**self).delete_post(id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        (**self).list_posts().await
    }
}
