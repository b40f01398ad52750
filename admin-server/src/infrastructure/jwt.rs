use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("token ttl of {0}s is out of range")]
    TtlOutOfRange(i64),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    #[serde(rename = "userId")]
    pub(crate) user_id: Uuid,
    pub(crate) iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) exp: Option<i64>,
}

/// Без TTL токен не содержит `exp` и действует, пока не сменится секрет.
pub(crate) struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: Option<i64>,
}

impl JwtService {
    pub(crate) fn new(secret: &str, ttl_seconds: Option<i64>) -> Self {
        JwtService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: ttl_seconds.filter(|ttl| *ttl > 0),
        }
    }

    pub(crate) fn generate_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = match self.ttl_seconds {
            Some(ttl) => Some(
                Duration::try_seconds(ttl)
                    .and_then(|ttl| now.checked_add_signed(ttl))
                    .ok_or(JwtError::TtlOutOfRange(ttl))?
                    .timestamp(),
            ),
            None => None,
        };
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp,
        };

        self.encode_claims(&claims)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp проверяется, если есть, но не обязателен
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(JwtError::Encode)
    }
}
