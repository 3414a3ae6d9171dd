use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REVIEWS_URL: &str = "https://api.nytimes.com/svc/books/v3/reviews.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    Empty(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("unknown BACKEND_TYPE {0:?}, expected mysql or memory")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    MySql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub pool_size: u32,
    pub timezone: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub database: DatabaseConfig,
    pub reviews: ReviewConfig,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset names get defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("BACKEND_TYPE")
            .unwrap_or_else(|| "mysql".to_string())
            .to_lowercase()
            .as_str()
        {
            "mysql" => BackendKind::MySql,
            "memory" => BackendKind::Memory,
            other => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let pool_size = parse_or(&lookup, "MYSQL_CONNECTION", 4u32)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "MYSQL_CONNECTION",
                value: "0".to_string(),
            });
        }

        let database = DatabaseConfig {
            host: lookup("MYSQL_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&lookup, "MYSQL_PORT", 3306u16)?,
            database: lookup("MYSQL_DB").unwrap_or_else(|| "goodreads".to_string()),
            user: lookup("MYSQL_USER").unwrap_or_else(|| "root".to_string()),
            password: lookup("MYSQL_PASS").unwrap_or_default(),
            pool_size,
            timezone: lookup("MYSQL_TIMEZONE").unwrap_or_else(|| "+08:00".to_string()),
            timeout: timeout_or(&lookup, "DB_TIMEOUT_SECS", 5)?,
        };

        let reviews = ReviewConfig {
            api_key: lookup("NYT_API_KEY").unwrap_or_default(),
            base_url: lookup("NYT_REVIEWS_URL").unwrap_or_else(|| DEFAULT_REVIEWS_URL.to_string()),
            timeout: timeout_or(&lookup, "REVIEW_TIMEOUT_SECS", 10)?,
        };

        let port = match lookup("PORT") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::Empty("PORT")),
            Some(value) => parse_value("PORT", &value)?,
            None => 3000,
        };

        Ok(Self {
            backend,
            database,
            reviews,
            port,
        })
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => parse_value(name, &value),
        None => Ok(default),
    }
}

/// Timeouts are whole seconds; zero would fail every call immediately.
fn timeout_or<F>(lookup: &F, name: &'static str, default_secs: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, name, default_secs)?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
