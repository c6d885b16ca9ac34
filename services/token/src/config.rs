//! Centralized configuration for the token service.
//!
//! All configuration is loaded from `SERVER_`-prefixed environment variables
//! (optionally seeded from a `.env` file) and validated at startup.

use crate::auth::RotationMode;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "SERVER_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Full variable name
        name: String,
        /// Parser message
        reason: String,
    },

    /// Invalid port number
    #[error("Invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Invalid TTL combination
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

/// JWT signing algorithm.
///
/// Only HMAC algorithms are offered: the service signs and verifies with one
/// shared process secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
}

impl SigningAlgorithm {
    /// Get algorithm name for JWT header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
        }
    }

    /// The matching `jsonwebtoken` algorithm.
    #[must_use]
    pub const fn to_jwt(self) -> jsonwebtoken::Algorithm {
        match self {
            Self::HS256 => jsonwebtoken::Algorithm::HS256,
            Self::HS384 => jsonwebtoken::Algorithm::HS384,
            Self::HS512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            _ => Err(format!("unsupported signing algorithm: {s}")),
        }
    }
}

/// Token service configuration.
#[derive(Debug)]
pub struct Config {
    // Server settings
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    // JWT settings
    /// Process-wide signing secret
    pub jwt_secret: SecretString,
    /// JWT signing algorithm
    pub jwt_algorithm: SigningAlgorithm,
    /// Access token TTL
    pub access_token_ttl: Duration,
    /// Refresh token TTL
    pub refresh_token_ttl: Duration,
    /// How rotation checks and replaces the stored refresh digest
    pub rotation_mode: RotationMode,

    // Storage settings
    /// MongoDB connection string
    pub mongo_uri: SecretString,
    /// MongoDB database name
    pub mongo_db: String,
    /// Deadline for each persistence call
    pub store_timeout: Duration,

    // Logging
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `lookup` receives fully prefixed names such as `SERVER_PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let config = Self {
            host: vars.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: vars.parse("PORT", 1234)?,
            jwt_secret: SecretString::from(vars.required("JWT_SECRET")?),
            jwt_algorithm: vars.parse("JWT_ALGORITHM", SigningAlgorithm::HS512)?,
            access_token_ttl: Duration::from_secs(vars.parse("ACCESS_TOKEN_TTL", 300)?),
            refresh_token_ttl: Duration::from_secs(vars.parse("REFRESH_TOKEN_TTL", 604_800)?),
            rotation_mode: vars.parse("ROTATION_MODE", RotationMode::Atomic)?,
            mongo_uri: SecretString::from(vars.required("MONGO_URI")?),
            mongo_db: vars.required("MONGO_DB")?,
            store_timeout: Duration::from_secs(vars.parse("STORE_TIMEOUT", 60)?),
            log_level: vars.get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: vars.parse("LOG_JSON", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Socket address string to bind the HTTP listener to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ConfigError::MissingRequired(format!("{ENV_PREFIX}JWT_SECRET")));
        }
        if self.access_token_ttl.is_zero() {
            return Err(ConfigError::InvalidTtl("access token TTL must be greater than 0".to_string()));
        }
        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err(ConfigError::InvalidTtl(
                "refresh token TTL must exceed access token TTL".to_string(),
            ));
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::ParseError {
                name: format!("{ENV_PREFIX}STORE_TIMEOUT"),
                reason: "timeout must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Prefixed variable access over a lookup function.
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(&format!("{ENV_PREFIX}{key}"))
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ConfigError::MissingRequired(format!("{ENV_PREFIX}{key}"))),
        }
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(val) => val.parse().map_err(|e: T::Err| ConfigError::ParseError {
                name: format!("{ENV_PREFIX}{key}"),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}
