use std::fmt;
use std::time::Duration;

const DEFAULT_DATABASE_NAME: &str = "user_service";

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub user_collection: String,
    /// Deadline applied to the store calls of each handler.
    pub store_timeout: Duration,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: '{}'", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_number(&lookup, "PORT", 2022u16)?;
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let database_name = lookup("DATABASE_NAME")
            .unwrap_or_else(|| database_name_from_url(&database_url).unwrap_or(DEFAULT_DATABASE_NAME).to_string());
        let user_collection = lookup("USER_COLLECTION").unwrap_or_else(|| "user".to_string());
        let store_timeout = Duration::from_secs(parse_number(&lookup, "STORE_TIMEOUT_SECS", 10u64)?);
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Settings {
            host,
            port,
            database_url,
            database_name,
            user_collection,
            store_timeout,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { key, value }),
        None => Ok(default),
    }
}

/// Extracts the database name from a URI such as `mongodb://host:27017/app?retryWrites=true`.
fn database_name_from_url(url: &str) -> Option<&str> {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let (_, path) = without_scheme.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
