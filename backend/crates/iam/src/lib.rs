//! IAM (Identity and Access Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//!
//! ## Features
//! - User signup/signin with email + password
//! - Stateless JWT access tokens (HS256, audience/issuer bound)
//! - Rotating single-use refresh tokens with replay detection
//! - Role and permission checks on verified token claims
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Every refresh rotates the token; one live refresh token per user
//! - Reuse of a rotated refresh token is refused as a replay (403),
//!   distinct from an ordinary invalid credential (401)
//! - Sign-in failures are indistinguishable (wrong password vs unknown
//!   email)

pub mod application;
pub mod domain;
pub mod error;
pub mod hashing;
pub mod infra;
pub mod token;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::access_control::ActiveUserData;
pub use application::config::IamConfig;
pub use application::issue::TokenPair;
pub use application::refresh_tokens::RefreshTokensUseCase;
pub use application::sign_in::{SignInInput, SignInUseCase};
pub use application::sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use error::{IamError, IamResult};
pub use hashing::{Argon2Hashing, HashingService};
pub use infra::memory::InMemoryIamStore;
pub use infra::postgres::PgIamStore;
pub use token::{AccessTokenClaims, JwtTokenSigner, RefreshTokenClaims, TokenSigner};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
