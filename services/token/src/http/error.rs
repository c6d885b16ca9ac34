//! Mapping of [`TokenError`] onto status codes.

use crate::error::{ErrorClass, TokenError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

/// Handler error. Renders as a bare status code.
#[derive(Debug)]
pub struct ApiError(pub TokenError);

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.class() {
            ErrorClass::Unauthorized => {
                info!(error = %self.0, "Request unauthorized");
                StatusCode::UNAUTHORIZED.into_response()
            }
            ErrorClass::Internal => {
                error!(error = %self.0, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::RejectReason;

    #[test]
    fn test_status_codes() {
        let cases = [
            (TokenError::MissingIdentity, StatusCode::UNAUTHORIZED),
            (
                TokenError::TokenRejected {
                    reason: RejectReason::Expired,
                },
                StatusCode::UNAUTHORIZED,
            ),
            (TokenError::CredentialNotVerified, StatusCode::UNAUTHORIZED),
            (TokenError::storage("down"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                TokenError::Timeout("users.find_by_guid".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }
}
