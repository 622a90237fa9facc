//! IAM Error Types
//!
//! Domain error variants for the authentication core, with mappings to the
//! unified `kernel::error` classification and to HTTP status codes. The
//! transport layer owns the actual response encoding; this module only
//! decides *which* status a failure is equivalent to.

use http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// IAM-specific result type alias
pub type IamResult<T> = Result<T, IamError>;

/// IAM error variants
///
/// Bad email/password, expired or malformed refresh tokens, and refresh
/// tokens with no backing session all collapse into [`InvalidCredentials`]
/// so callers cannot tell which check failed.
///
/// [`InvalidCredentials`]: IamError::InvalidCredentials
#[derive(Debug, Error)]
pub enum IamError {
    /// Authentication failed (deliberately unspecific)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A refresh token id exists for the user but does not match the one
    /// presented. Raised by the registry on reuse of a rotated token.
    #[error("Refresh token has been invalidated")]
    InvalidatedRefreshToken,

    /// The caller is authenticated but not allowed: detected refresh-token
    /// replay, or a missing permission/role grant.
    #[error("Access denied")]
    AccessDenied,

    /// Sign-up with an email that is already registered
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Input validation failure (e.g. malformed email)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password rejected by the password policy
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Token signing failure
    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    /// Infrastructure failure in the credential store or session registry.
    /// Propagated unchanged; never retried here.
    #[error("Store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IamError {
    /// Get the HTTP status code this error is equivalent to
    pub fn status_code(&self) -> StatusCode {
        match self {
            IamError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            IamError::InvalidatedRefreshToken | IamError::AccessDenied => StatusCode::FORBIDDEN,
            IamError::EmailAlreadyExists => StatusCode::CONFLICT,
            IamError::Validation(_) | IamError::PasswordPolicy(_) => StatusCode::BAD_REQUEST,
            IamError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            IamError::TokenCreation(_) | IamError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IamError::InvalidCredentials => ErrorKind::Unauthorized,
            IamError::InvalidatedRefreshToken | IamError::AccessDenied => ErrorKind::Forbidden,
            IamError::EmailAlreadyExists => ErrorKind::Conflict,
            IamError::Validation(_) | IamError::PasswordPolicy(_) => ErrorKind::BadRequest,
            IamError::Store(_) => ErrorKind::ServiceUnavailable,
            IamError::TokenCreation(_) | IamError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the unified AppError for the boundary
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with the appropriate level
    pub fn log(&self) {
        match self {
            IamError::Store(e) => {
                tracing::error!(error = %e, "IAM store error");
            }
            IamError::TokenCreation(msg) | IamError::Internal(msg) => {
                tracing::error!(message = %msg, "IAM internal error");
            }
            IamError::InvalidCredentials => {
                tracing::warn!("Invalid authentication attempt");
            }
            IamError::InvalidatedRefreshToken | IamError::AccessDenied => {
                tracing::warn!("Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "IAM error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            IamError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(IamError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            IamError::InvalidatedRefreshToken.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            IamError::EmailAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            IamError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IamError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(IamError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(IamError::EmailAlreadyExists.kind(), ErrorKind::Conflict);
        assert_eq!(
            IamError::PasswordPolicy("weak".into()).kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_to_app_error() {
        let err = IamError::EmailAlreadyExists.to_app_error();
        assert_eq!(err.status_code(), 409);
    }
}
