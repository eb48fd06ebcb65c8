//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blogicum_core::pagination::POSTS_PER_PAGE;
use blogicum_infra::JwtConfig;
use blogicum_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the in-memory content store.
    pub database: Option<DatabaseConfig>,
    pub posts_per_page: usize,
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from a variable lookup such as
    /// `|k| std::env::var(k).ok()`.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|main_url| DatabaseConfig {
                main_url,
                main_max_connections: parsed(&var, "DB_MAX_CONNECTIONS").unwrap_or(100),
                main_min_connections: parsed(&var, "DB_MIN_CONNECTIONS").unwrap_or(10),
                sql_logging: parsed(&var, "DB_SQL_LOGGING").unwrap_or(false),
            });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&var, "PORT").unwrap_or(8080),
            database,
            posts_per_page: parsed(&var, "POSTS_PER_PAGE")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(POSTS_PER_PAGE),
            jwt: JwtConfig::from_vars(&var),
            telemetry: TelemetryConfig::from_vars(&var),
        }
    }
}

fn parsed<T, F>(var: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.posts_per_page, 10);
    }

    #[test]
    fn test_database_pool_settings() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/blogicum"),
            ("DB_MAX_CONNECTIONS", "50"),
            ("DB_SQL_LOGGING", "true"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.main_url, "postgres://localhost/blogicum");
        assert_eq!(db.main_max_connections, 50);
        assert_eq!(db.main_min_connections, 10);
        assert!(db.sql_logging);
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        assert!(config(&[("DATABASE_URL", "  ")]).database.is_none());
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[("PORT", "http"), ("POSTS_PER_PAGE", "0")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.posts_per_page, 10);
    }
}
