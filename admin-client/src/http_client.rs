use reqwest::header::{COOKIE, HeaderMap, LOCATION, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, redirect};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{AdminClientError, AdminClientResult};
use crate::models::{Post, User};

/// Имя cookie, в котором сервер выдаёт сессионный JWT.
pub(crate) const SESSION_COOKIE: &str = "token";

#[derive(Debug, Serialize)]
struct CredentialsDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct PostFormDto<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterResponseDto {
    user: User,
}

#[derive(Debug, Deserialize)]
struct DashboardViewDto {
    data: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct EditPostViewDto {
    data: Post,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для админского API `admin-server`.
///
/// Редиректы не отслеживаются: успешные мутации сервер подтверждает ответом 303.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> AdminClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.header(COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> AdminClientResult<Response> {
        request.send().await.map_err(AdminClientError::from_reqwest)
    }

    async fn decode_error(response: Response) -> AdminClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        AdminClientError::from_http_status(status, message)
    }

    /// ожидаем 2xx и json-тело
    async fn expect_json<T>(response: Response) -> AdminClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AdminClientError::UnexpectedResponse(err.to_string()))
    }

    /// ожидаем редирект, возвращаем его Location
    async fn expect_redirect(response: Response) -> AdminClientResult<String> {
        let status = response.status();
        if !status.is_redirection() {
            if status.is_success() {
                return Err(AdminClientError::UnexpectedResponse(format!(
                    "expected redirect, got {status}"
                )));
            }
            return Err(Self::decode_error(response).await);
        }

        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string())
    }

    /// Регистрирует администратора.
    pub async fn register(&self, username: &str, password: &str) -> AdminClientResult<User> {
        let payload = CredentialsDto { username, password };
        let response = Self::send(self.request(Method::POST, "/register", None).json(&payload))
            .await?;

        let dto: RegisterResponseDto = Self::expect_json(response).await?;
        Ok(dto.user)
    }

    /// Выполняет вход и возвращает JWT из cookie `token`.
    pub async fn login(&self, username: &str, password: &str) -> AdminClientResult<String> {
        let payload = CredentialsDto { username, password };
        let response =
            Self::send(self.request(Method::POST, "/admins", None).json(&payload)).await?;

        let token = session_token(response.headers());
        Self::expect_redirect(response).await?;
        token.ok_or_else(|| {
            AdminClientError::UnexpectedResponse("login response has no session cookie".to_string())
        })
    }

    /// Просит сервер сбросить cookie сессии.
    pub async fn logout(&self, token: Option<&str>) -> AdminClientResult<()> {
        let response = Self::send(self.request(Method::GET, "/logout", token)).await?;
        Self::expect_redirect(response).await?;
        Ok(())
    }

    /// Возвращает все посты, новые первыми.
    pub async fn dashboard(&self, token: &str) -> AdminClientResult<Vec<Post>> {
        let response = Self::send(self.request(Method::GET, "/dashboard", Some(token))).await?;
        let dto: DashboardViewDto = Self::expect_json(response).await?;
        Ok(dto.data)
    }

    /// Создаёт пост.
    pub async fn create_post(&self, token: &str, title: &str, body: &str) -> AdminClientResult<()> {
        let payload = PostFormDto { title, body };
        let response = Self::send(
            self.request(Method::POST, "/add-post", Some(token))
                .json(&payload),
        )
        .await?;

        Self::expect_redirect(response).await?;
        Ok(())
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, token: &str, id: Uuid) -> AdminClientResult<Post> {
        let response = Self::send(self.request(
            Method::GET,
            &format!("/edit-post/{id}"),
            Some(token),
        ))
        .await?;

        let dto: EditPostViewDto = Self::expect_json(response).await?;
        Ok(dto.data)
    }

    /// Заменяет заголовок и текст поста.
    ///
    /// Для несуществующего id сервер тоже отвечает редиректом.
    pub async fn update_post(
        &self,
        token: &str,
        id: Uuid,
        title: &str,
        body: &str,
    ) -> AdminClientResult<()> {
        let payload = PostFormDto { title, body };
        let response = Self::send(
            self.request(Method::PUT, &format!("/edit-post/{id}"), Some(token))
                .json(&payload),
        )
        .await?;

        Self::expect_redirect(response).await?;
        Ok(())
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, token: &str, id: Uuid) -> AdminClientResult<()> {
        let response = Self::send(self.request(
            Method::DELETE,
            &format!("/delete-post/{id}"),
            Some(token),
        ))
        .await?;

        Self::expect_redirect(response).await?;
        Ok(())
    }
}

/// Достаёт значение cookie `token` из заголовков `Set-Cookie`.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| raw.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    use super::*;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/dashboard");
        assert_eq!(full, "http://localhost:8080/dashboard");
    }

    #[test]
    fn session_token_reads_token_cookie() {
        let headers = headers(&["token=abc.def.ghi; HttpOnly; SameSite=Lax; Path=/"]);
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn session_token_skips_other_cookies() {
        let headers = headers(&["theme=dark; Path=/", "token=jwt; HttpOnly"]);
        assert_eq!(session_token(&headers).as_deref(), Some("jwt"));
    }

    #[test]
    fn session_token_ignores_removal_cookie() {
        let headers = headers(&["token=; Max-Age=0; Path=/"]);
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn session_token_absent() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn dashboard_payload_ignores_view_fields() {
        let raw = r#"{
            "view": "admins/dashboard",
            "layout": "layouts/admin",
            "locals": {"title": "Dashboard", "description": ""},
            "data": [{
                "id": "7f6c1d8e-2f4b-4f52-9d7a-3e1f0c2b5a10",
                "title": "t",
                "body": "b",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-02T00:00:00Z"
            }]
        }"#;

        let dto: DashboardViewDto = serde_json::from_str(raw).expect("payload must parse");
        assert_eq!(dto.data.len(), 1);
        assert_eq!(dto.data[0].title, "t");
        assert!(dto.data[0].updated_at > dto.data[0].created_at);
    }
}
