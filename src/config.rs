use std::collections::HashMap;
use std::env;

/// Default lifetime of issued tokens, in days.
pub const DEFAULT_JWT_TTL_DAYS: i64 = 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_ttl: chrono::Duration,
    pub environment: Environment,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are mandatory; the signing secret never falls
    /// back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<&str, &str>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "SERVER_PORT", value })?,
            None => 5000,
        };

        let jwt_ttl_days = match lookup("JWT_TTL_DAYS") {
            Some(value) => match value.parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => return Err(ConfigError::Invalid { name: "JWT_TTL_DAYS", value }),
            },
            None => DEFAULT_JWT_TTL_DAYS,
        };

        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl: chrono::Duration::days(jwt_ttl_days),
            environment,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
