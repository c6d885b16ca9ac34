//! Route handlers.

use crate::auth::AuthService;
use crate::error::TokenError;
use crate::http::error::ApiError;
use crate::http::response::{REFRESH_COOKIE, token_response};
use crate::metrics;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Identity from the `POST /auth` query string.
///
/// Only the first `guid` counts; later repeats are ignored.
pub fn first_guid(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .find(|(key, _)| key == "guid")
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// `POST /auth?guid=...`
pub async fn issue<A: AuthService>(
    State(service): State<Arc<A>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let guid = first_guid(&pairs);
    let pair = service.issue(&guid).await?;
    Ok(token_response(pair)?)
}

/// `POST /refresh` with the `refresh_token` cookie.
pub async fn refresh<A: AuthService>(
    State(service): State<Arc<A>>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let presented = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(TokenError::TokenMissing)?;

    let pair = service.rotate(&presented).await?;
    Ok(token_response(pair)?)
}

/// `GET /metrics`
pub async fn render_metrics() -> Result<Response, ApiError> {
    let body = metrics::render().map_err(|e| TokenError::internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response())
}
