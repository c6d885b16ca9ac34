//! Shared library for cross-cutting concerns in auth-platform Rust services.
//!
//! This crate provides centralized implementations for:
//! - A shared error type for platform helpers
//! - Per-call deadlines for outbound I/O
//! - Tracing subscriber bootstrap

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deadline;
pub mod error;
pub mod tracing_config;

pub use deadline::with_deadline;
pub use error::PlatformError;
pub use tracing_config::{TracingConfig, init_tracing};
