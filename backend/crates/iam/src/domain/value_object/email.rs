//! Email Value Object
//!
//! Validated sign-in identifier, stored lowercased so lookups are
//! case-insensitive. Format checks only; deliverability is not verified.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum total length (per RFC 5321)
const MAX_TOTAL_LEN: usize = 254;
/// Maximum local-part length
const MAX_LOCAL_LEN: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }
        if email.len() > MAX_TOTAL_LEN {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                MAX_TOTAL_LEN
            )));
        }

        let (local, domain) = email
            .split_once('@')
            .filter(|(l, d)| !l.contains('@') && !d.contains('@'))
            .ok_or_else(|| AppError::bad_request("Invalid email format"))?;

        if local.is_empty() || local.len() > MAX_LOCAL_LEN {
            return Err(AppError::bad_request("Invalid email format"));
        }
        if !Self::domain_is_valid(domain) {
            return Err(AppError::bad_request("Invalid email format"));
        }

        Ok(Self(email))
    }

    fn domain_is_valid(domain: &str) -> bool {
        // Dotted labels of alphanumerics and hyphens, no empty labels, no
        // label starting or ending with a hyphen
        domain.contains('.')
            && domain.split('.').all(|label| {
                !label.is_empty()
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
