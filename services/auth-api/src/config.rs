//! Configuration for the Auth API service.

use std::str::FromStr;
use std::time::Duration;

use warden_core::AuthConfig;
use warden_db::PoolOptions;

/// Deployment mode; reflection is only served outside production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    #[default]
    Development,
    Production,
}

impl FromStr for ServerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::Invalid("SERVER_MODE")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP (health) server port
    pub http_port: u16,

    /// gRPC server port
    pub grpc_port: u16,

    /// Database URL
    pub database_url: String,

    /// Database pool tuning
    pub pool: PoolOptions,

    /// Redis URL; in-memory gateways are used when absent
    pub redis_url: Option<String>,

    /// Orchestrator TTLs
    pub auth: AuthConfig,

    /// Upper bound on any per-call deadline
    pub request_timeout: Duration,

    pub mode: ServerMode,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }

        let redis_url = lookup("REDIS_URL").filter(|v| !v.trim().is_empty());

        // Server ports
        let http_port = parse_or(&lookup, "HTTP_PORT", 8080)?;
        let grpc_port = parse_or(&lookup, "GRPC_PORT", 5000)?;

        // TTLs
        let session_ttl_secs: u64 = parse_or(&lookup, "SESSION_TTL_SECS", 86_400)?;
        if session_ttl_secs == 0 {
            return Err(ConfigError::Invalid("SESSION_TTL_SECS"));
        }
        let cache_ttl_secs: u64 = parse_or(&lookup, "USER_CACHE_TTL_SECS", 3600)?;
        if cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid("USER_CACHE_TTL_SECS"));
        }

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        let mode = match lookup("SERVER_MODE") {
            Some(v) => v.parse()?,
            None => ServerMode::default(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let auth = AuthConfig::default()
            .with_session_ttl(Duration::from_secs(session_ttl_secs))
            .with_user_cache_ttl(Duration::from_secs(cache_ttl_secs));

        Ok(Self {
            http_port,
            grpc_port,
            database_url,
            pool: PoolOptions {
                max_connections,
                ..PoolOptions::default()
            },
            redis_url,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            mode,
            log_format,
        })
    }

    pub fn reflection_enabled(&self) -> bool {
        self.mode != ServerMode::Production
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
