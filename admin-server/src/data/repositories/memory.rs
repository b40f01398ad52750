use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

#[derive(Clone, Default)]
pub(crate) struct InMemoryPostRepository {
    posts: Arc<Mutex<Vec<Post>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn snapshot(&self, id: Uuid) -> Option<Post> {
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .find(|post| post.id == id)
            .cloned()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        self.touch();
        let now = Utc::now();
        let post = Post::new(Uuid::new_v4(), input.title, input.body, now, now)?;
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        self.touch();
        Ok(self.snapshot(id))
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError> {
        self.touch();
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(false);
        };
        post.title = patch.title;
        post.body = patch.body;
        post.updated_at = Utc::now().max(post.created_at);
        Ok(true)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        self.touch();
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok(posts.len() < before)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.touch();
        let mut posts = self.posts.lock().expect("posts mutex poisoned").clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<UserCredentials>>>,
    broken: bool,
}

impl InMemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub(crate) fn stored_hash(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|creds| creds.user.username == username)
            .map(|creds| creds.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        if self.broken {
            return Err(DomainError::Unexpected("connection reset".to_string()));
        }

        let mut users = self.users.lock().expect("users mutex poisoned");
        if users
            .iter()
            .any(|creds| creds.user.username == input.username)
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let user = User::new(Uuid::new_v4(), input.username, Utc::now())?;
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|creds| creds.user.username == username)
            .cloned())
    }
}
