use anyhow::{Context, Result, anyhow};

// 10 лет
const MAX_JWT_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: Option<i64>,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub cookie_secure: bool,
    pub admin_layout: String,
    pub site_description: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            get_required(&lookup, "DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_secret = get_required(&lookup, "JWT_SECRET").context("JWT_SECRET is required")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        // 0 или отсутствие переменной: токены без срока действия
        let jwt_ttl_seconds = match lookup("JWT_TTL_SECONDS") {
            Some(raw) if !raw.trim().is_empty() => {
                let ttl: i64 = raw
                    .trim()
                    .parse()
                    .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;
                if ttl > MAX_JWT_TTL_SECONDS {
                    return Err(anyhow!(
                        "JWT_TTL_SECONDS must be at most {MAX_JWT_TTL_SECONDS}"
                    ));
                }
                (ttl > 0).then_some(ttl)
            }
            _ => None,
        };

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize(&lookup, "HTTP_CONCURRENCY_LIMIT", 256)?;
        let database_max_connections =
            u32::try_from(parse_usize(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?)
                .context("DATABASE_MAX_CONNECTIONS is too large")?;
        let cookie_secure = parse_bool(&lookup, "COOKIE_SECURE", false)?;
        let admin_layout =
            lookup("ADMIN_LAYOUT").unwrap_or_else(|| "layouts/admin".to_string());
        let site_description = lookup("SITE_DESCRIPTION")
            .unwrap_or_else(|| "Simple blog admin built with Rust, axum & PostgreSQL.".to_string());

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            cookie_secure,
            admin_layout,
            site_description,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(anyhow!("Failed to parse {key}: '{other}' is not a boolean")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_applied() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/admin"),
            ("JWT_SECRET", SECRET),
        ])
        .expect("settings must load");

        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.jwt_ttl_seconds, None);
        assert_eq!(settings.http_concurrency_limit, 256);
        assert_eq!(settings.database_max_connections, 5);
        assert!(!settings.cookie_secure);
        assert_eq!(settings.admin_layout, "layouts/admin");
        assert_eq!(settings.cors_origins.len(), 2);
    }

    #[test]
    fn missing_database_url_fails() {
        assert!(settings_from(&[("JWT_SECRET", SECRET)]).is_err());
    }

    #[test]
    fn short_jwt_secret_fails() {
        let result = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/admin"),
            ("JWT_SECRET", "short"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn ttl_and_flags_are_parsed() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/admin"),
            ("JWT_SECRET", SECRET),
            ("JWT_TTL_SECONDS", "3600"),
            ("COOKIE_SECURE", "true"),
            ("CORS_ORIGINS", " https://admin.example.com , "),
        ])
        .expect("settings must load");

        assert_eq!(settings.jwt_ttl_seconds, Some(3600));
        assert!(settings.cookie_secure);
        assert_eq!(settings.cors_origins, vec!["https://admin.example.com"]);
    }

    #[test]
    fn zero_ttl_means_no_expiry() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/admin"),
            ("JWT_SECRET", SECRET),
            ("JWT_TTL_SECONDS", "0"),
        ])
        .expect("settings must load");
        assert_eq!(settings.jwt_ttl_seconds, None);
    }

    #[test]
    fn invalid_numbers_fail() {
        let result = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/admin"),
            ("JWT_SECRET", SECRET),
            ("HTTP_CONCURRENCY_LIMIT", "0"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn huge_ttl_is_rejected() {
        for ttl in ["315360001", "9223372036854775807"] {
            let result = settings_from(&[
                ("DATABASE_URL", "postgres://localhost/admin"),
                ("JWT_SECRET", SECRET),
                ("JWT_TTL_SECONDS", ttl),
            ]);
            assert!(result.is_err(), "ttl = {ttl}");
        }
    }
}
