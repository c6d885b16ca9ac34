//! HTTP transport.
//!
//! | Route            | Success                               | Failure        |
//! |------------------|---------------------------------------|----------------|
//! | `POST /auth`     | `200` JSON + `refresh_token` cookie   | `401` / `500`  |
//! | `POST /refresh`  | `200` JSON + `refresh_token` cookie   | `401` / `500`  |
//! | `GET /metrics`   | `200` Prometheus text                 | `500`          |
//!
//! Failure responses carry no body.

pub mod error;
pub mod handlers;
pub mod response;

use crate::auth::AuthService;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

pub use error::ApiError;
pub use response::{REFRESH_COOKIE, TokenResponse};

/// Build the service router over `service`.
pub fn router<A: AuthService>(service: Arc<A>) -> Router {
    Router::new()
        .route("/auth", post(handlers::issue::<A>))
        .route("/refresh", post(handlers::refresh::<A>))
        .route("/metrics", get(handlers::render_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(service)
}

/// Bare `500` for a panicked handler; the payload only reaches the logs.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = %detail, "Handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
