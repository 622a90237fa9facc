//! User Entity
//!
//! The user aggregate. The original data model keeps credentials on the
//! user record itself, so the password hash lives here rather than in a
//! separate credentials entity. Identity (id, email) is immutable after
//! sign-up; profile-management flows are out of scope.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, Permission, Role, UserId, UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique email, used for sign-in
    pub email: Email,
    /// Argon2id password hash (never the plaintext)
    pub password_hash: UserPassword,
    /// Role (Regular, Admin)
    pub role: Role,
    /// Fine-grained catalog permissions
    pub permissions: Vec<Permission>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role and no permissions
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            role: Role::default(),
            permissions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the user holds a permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Grant a permission (idempotent)
    pub fn grant_permission(&mut self, permission: Permission) {
        if !self.has_permission(permission) {
            self.permissions.push(permission);
            self.updated_at = Utc::now();
        }
    }

    /// Update the user role
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
