use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::features::struggling::StrugglingPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{0}")]
    OutOfRange(String),
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub default_session_limit: i64,
    pub max_session_limit: i64,
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
    pub struggling: StrugglingPolicy,
    pub admin_user_ids: Vec<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "review.db".to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            default_session_limit: 10,
            max_session_limit: 100,
            session_ttl: Duration::from_secs(120 * 60),
            cleanup_interval: Duration::from_secs(300),
            struggling: StrugglingPolicy::default(),
            admin_user_ids: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let policy = defaults.struggling.clone();

        let config = Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: parse_or(&lookup, "HOST", defaults.host)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            default_session_limit: parse_or(
                &lookup,
                "DEFAULT_SESSION_LIMIT",
                defaults.default_session_limit,
            )?,
            max_session_limit: parse_or(&lookup, "MAX_SESSION_LIMIT", defaults.max_session_limit)?,
            session_ttl: Duration::from_secs(
                parse_or(&lookup, "SESSION_TTL_MINUTES", 120u64)? * 60,
            ),
            cleanup_interval: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval.as_secs(),
            )?),
            struggling: StrugglingPolicy {
                consecutive_failures: parse_or(
                    &lookup,
                    "STRUGGLING_CONSECUTIVE_FAILURES",
                    policy.consecutive_failures,
                )?,
                failure_ratio: parse_or(&lookup, "STRUGGLING_FAILURE_RATIO", policy.failure_ratio)?,
                min_attempts_for_ratio: parse_or(
                    &lookup,
                    "STRUGGLING_MIN_ATTEMPTS",
                    policy.min_attempts_for_ratio,
                )?,
                graduation_streak: parse_or(
                    &lookup,
                    "STRUGGLING_GRADUATION_STREAK",
                    policy.graduation_streak,
                )?,
            },
            admin_user_ids: match lookup("ADMIN_USER_IDS") {
                Some(raw) => parse_id_list(&raw)?,
                None => Vec::new(),
            },
        };

        config.check()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.default_session_limit < 1 || self.default_session_limit > self.max_session_limit {
            return Err(ConfigError::OutOfRange(format!(
                "DEFAULT_SESSION_LIMIT must be between 1 and {}",
                self.max_session_limit
            )));
        }
        if self.session_ttl.is_zero() || self.cleanup_interval.is_zero() {
            return Err(ConfigError::OutOfRange(
                "session TTL and cleanup interval must be positive".to_string(),
            ));
        }
        self.struggling.validate().map_err(ConfigError::OutOfRange)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn parse_id_list(raw: &str) -> Result<Vec<i32>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ADMIN_USER_IDS",
                value: raw.to_string(),
            })
        })
        .collect()
}
