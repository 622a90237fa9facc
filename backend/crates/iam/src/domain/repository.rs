//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer; use cases receive them by constructor injection.

use crate::domain::entity::User;
use crate::domain::value_object::{Email, RefreshTokenId, UserId};
use crate::error::IamResult;

/// Credential store trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user. Fails with `EmailAlreadyExists` if the email is
    /// already registered.
    async fn create(&self, user: &User) -> IamResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> IamResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> IamResult<Option<User>>;
}

/// Refresh session registry trait
///
/// Tracks the single currently-valid refresh-token id per user. The entry
/// is always replaced whole; the backing store's single-key atomicity is
/// what linearizes `insert` against concurrent `validate` calls.
#[trait_variant::make(RefreshTokenRegistry: Send)]
pub trait LocalRefreshTokenRegistry {
    /// Store `refresh_token_id` as the live id for `user_id`,
    /// unconditionally overwriting any previous entry (which becomes
    /// invalid the instant the new one is stored).
    async fn insert(&self, user_id: &UserId, refresh_token_id: &RefreshTokenId) -> IamResult<()>;

    /// Check a presented refresh-token id against the stored one.
    ///
    /// - `Ok(true)`: exact match, the token is live
    /// - `Ok(false)`: no entry for this user (never issued / cleared)
    /// - `Err(IamError::InvalidatedRefreshToken)`: an entry exists but
    ///   does not match, i.e. reuse of a rotated token, a replay signal
    async fn validate(&self, user_id: &UserId, refresh_token_id: &RefreshTokenId)
    -> IamResult<bool>;
}
