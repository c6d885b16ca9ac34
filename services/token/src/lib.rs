//! Token service library.
//!
//! Issues GUID-keyed access/refresh JWT pairs and rotates refresh tokens
//! against a single hashed slot per identity.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod jwt;
pub mod metrics;
pub mod refresh;
pub mod shutdown;
pub mod storage;

// Re-exports for convenience
pub use auth::{AuthOrchestrator, AuthService, RotationMode, TokenPolicy};
pub use config::Config;
pub use error::TokenError;
