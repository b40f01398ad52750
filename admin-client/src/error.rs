use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `admin-client`.
pub enum AdminClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Нет сессии или сервер отклонил cookie/учётные данные.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Запрошенный ресурс не найден.
    #[error("not found: {0}")]
    NotFound(String),

    /// Конфликт, например имя пользователя уже занято.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Некорректный запрос (ошибка валидации, неверный id).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Сервер ответил не так, как ожидалось (статус, тело, cookie).
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Результат операций `admin-client`.
pub type AdminClientResult<T> = Result<T, AdminClientError>;

impl AdminClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized(message)
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            status if status.is_client_error() => Self::InvalidRequest(message),
            _ => Self::UnexpectedResponse(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::AdminClientError;

    #[test]
    fn maps_statuses_to_variants() {
        assert!(matches!(
            AdminClientError::from_http_status(StatusCode::UNAUTHORIZED, None),
            AdminClientError::Unauthorized(_)
        ));
        assert!(matches!(
            AdminClientError::from_http_status(StatusCode::NOT_FOUND, None),
            AdminClientError::NotFound(_)
        ));
        assert!(matches!(
            AdminClientError::from_http_status(StatusCode::BAD_REQUEST, None),
            AdminClientError::InvalidRequest(_)
        ));
        assert!(matches!(
            AdminClientError::from_http_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            AdminClientError::UnexpectedResponse(_)
        ));
    }

    #[test]
    fn conflict_keeps_server_message() {
        let err = AdminClientError::from_http_status(
            StatusCode::CONFLICT,
            Some("username already in use".to_string()),
        );

        match err {
            AdminClientError::Conflict(message) => assert_eq!(message, "username already in use"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
