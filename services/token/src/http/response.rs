//! Success response shape: JSON body plus refresh cookie.

use crate::error::TokenError;
use crate::jwt::{SignedToken, SignedTokenPair};
use axum::Json;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// JSON body of a successful issue or rotate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Compact access JWT
    pub access_token: String,
    /// Access token expiry, unix seconds
    pub expires_at: i64,
}

/// HttpOnly cookie holding the refresh token until it expires.
pub fn refresh_cookie(refresh: &SignedToken) -> Result<Cookie<'static>, TokenError> {
    let expires = OffsetDateTime::from_unix_timestamp(refresh.expires_at().timestamp())
        .map_err(|e| TokenError::internal(format!("cookie expiry out of range: {e}")))?;

    Ok(Cookie::build((REFRESH_COOKIE, refresh.value().to_owned()))
        .http_only(true)
        .expires(expires)
        .build())
}

/// Render a pair as `200` JSON with the refresh cookie set.
pub fn token_response(pair: SignedTokenPair) -> Result<Response, TokenError> {
    let cookie = refresh_cookie(&pair.refresh)?;
    let body = TokenResponse {
        expires_at: pair.access.expires_at().timestamp(),
        access_token: pair.access.into_value(),
    };

    Ok((CookieJar::new().add(cookie), Json(body)).into_response())
}
