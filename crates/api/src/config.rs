//! API configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use common::{DatabaseConfig, ServiceConfig};

/// Minimum JWT secret length in bytes.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Development-only fallback secret.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Where users are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// Relational store through SeaORM
    #[default]
    Postgres,
    /// Process-local map; data is lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => f.write_str("postgres"),
            StorageBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Bearer token settings.
#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Set when `JWT_SECRET` was missing and the dev secret is in use
    pub using_dev_secret: bool,
}

impl AuthConfig {
    /// Build from an explicit secret, rejecting short ones.
    pub fn new(jwt_secret: impl Into<String>, jwt_expiration_hours: i64) -> Result<Self, String> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(format!(
                "JWT_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            ));
        }

        Ok(Self {
            jwt_secret,
            jwt_expiration_hours,
            using_dev_secret: false,
        })
    }

    /// Load from `JWT_SECRET` and `JWT_EXPIRATION_HOURS`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let hours = match lookup("JWT_EXPIRATION_HOURS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("Invalid JWT_EXPIRATION_HOURS: {}", raw))?,
            None => DEFAULT_JWT_EXPIRATION_HOURS,
        };

        match lookup("JWT_SECRET") {
            Some(secret) => Self::new(secret, hours),
            None if cfg!(debug_assertions) => Ok(Self {
                using_dev_secret: true,
                ..Self::new(DEV_JWT_SECRET, hours)?
            }),
            None => Err("JWT_SECRET must be set".to_string()),
        }
    }

    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            using_dev_secret: true,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("using_dev_secret", &self.using_dev_secret)
            .finish()
    }
}

/// API configuration.
///
/// Secrets are redacted, so deriving `Debug` is safe to log.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            service: ServiceConfig::from_env("user-api", "API"),
            database: DatabaseConfig::from_env(),
            storage: parse_storage(env::var("STORAGE_BACKEND").ok())?,
            auth: AuthConfig::from_env()?,
        })
    }
}

fn parse_storage(raw: Option<String>) -> Result<StorageBackend, String> {
    raw.map_or(Ok(StorageBackend::default()), |s| s.parse())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-api".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            storage: StorageBackend::default(),
            auth: AuthConfig::default(),
        }
    }
}
