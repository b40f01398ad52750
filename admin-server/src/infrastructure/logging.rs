use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

// уровень из настроек действует на сервер и http-трейсинг, зависимости молчат до warn
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!(
        "warn,admin_server={level},tower_http={level}"
    ))
    .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::level_filter;

    #[test]
    fn configured_level_targets_server_and_http_trace() {
        let filter = level_filter("debug").to_string();

        assert!(filter.contains("admin_server=debug"));
        assert!(filter.contains("tower_http=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let filter = level_filter("loud").to_string();

        assert!(!filter.contains("admin_server"));
        assert!(filter.contains("info"));
    }
}
