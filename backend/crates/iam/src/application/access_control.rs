//! Access Control
//!
//! The identity a verified access token asserts, plus role and
//! permission checks on top of it.

use crate::domain::value_object::{Permission, Role, UserId};
use crate::error::{IamError, IamResult};
use crate::token::{AccessTokenClaims, TokenSigner};

/// Identity extracted from a verified access token
#[derive(Debug, Clone)]
pub struct ActiveUserData {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl ActiveUserData {
    /// Verify `token` and extract the identity it asserts
    pub fn from_token<S: TokenSigner>(signer: &S, token: &str) -> IamResult<Self> {
        let claims = signer.verify_access(token)?;
        Ok(Self::from(claims))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Permission check, `AccessDenied` when absent
    pub fn require_permission(&self, permission: Permission) -> IamResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(IamError::AccessDenied)
        }
    }

    /// Role check, `AccessDenied` when the role does not grant `required`
    pub fn require_role(&self, required: Role) -> IamResult<()> {
        if self.role.grants(required) {
            Ok(())
        } else {
            Err(IamError::AccessDenied)
        }
    }
}

impl From<AccessTokenClaims> for ActiveUserData {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            user_id: UserId::from_uuid(claims.sub),
            email: claims.email,
            role: claims.role,
            permissions: claims.permissions,
        }
    }
}
