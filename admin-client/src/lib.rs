//! Клиентская библиотека для админского API `admin-server`.
//!
//! Сервер держит сессию в HTTP-only cookie `token`. Клиент не следует
//! редиректам: после `login` он забирает JWT из `Set-Cookie`, хранит его и
//! отправляет обратно заголовком `Cookie` в защищённых операциях.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{AdminClientError, AdminClientResult};
pub use http_client::HttpClient;
pub use models::{Post, User};

use uuid::Uuid;

#[derive(Debug, Clone)]
/// Клиент админки с сохранённой сессией.
pub struct AdminClient {
    http: HttpClient,
    token: Option<String>,
}

impl AdminClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> AdminClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную (например, прочитанный из файла).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует администратора. Токен не выдаётся, нужен отдельный `login`.
    pub async fn register(&self, username: &str, password: &str) -> AdminClientResult<User> {
        self.http.register(username, password).await
    }

    /// Выполняет вход и сохраняет токен из cookie сессии.
    pub async fn login(&mut self, username: &str, password: &str) -> AdminClientResult<()> {
        let token = self.http.login(username, password).await?;
        self.token = Some(token);
        Ok(())
    }

    /// Завершает сессию на сервере и забывает токен.
    pub async fn logout(&mut self) -> AdminClientResult<()> {
        self.http.logout(self.token.as_deref()).await?;
        self.token = None;
        Ok(())
    }

    /// Возвращает все посты.
    ///
    /// Требует установленный токен.
    pub async fn dashboard(&self) -> AdminClientResult<Vec<Post>> {
        self.http.dashboard(self.require_token()?).await
    }

    /// Создаёт пост.
    ///
    /// Требует установленный токен.
    pub async fn create_post(&self, title: &str, body: &str) -> AdminClientResult<()> {
        self.http
            .create_post(self.require_token()?, title, body)
            .await
    }

    /// Возвращает пост по идентификатору.
    ///
    /// Требует установленный токен.
    pub async fn get_post(&self, id: Uuid) -> AdminClientResult<Post> {
        self.http.get_post(self.require_token()?, id).await
    }

    /// Обновляет пост по идентификатору.
    ///
    /// Требует установленный токен.
    pub async fn update_post(&self, id: Uuid, title: &str, body: &str) -> AdminClientResult<()> {
        self.http
            .update_post(self.require_token()?, id, title, body)
            .await
    }

    /// Удаляет пост по идентификатору.
    ///
    /// Требует установленный токен.
    pub async fn delete_post(&self, id: Uuid) -> AdminClientResult<()> {
        self.http.delete_post(self.require_token()?, id).await
    }

    fn require_token(&self) -> AdminClientResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AdminClientError::Unauthorized("not logged in".to_string()))
    }
}
