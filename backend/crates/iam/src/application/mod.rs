//! Application Layer
//!
//! Use cases and application services.

pub mod access_control;
pub mod config;
pub mod issue;
pub mod refresh_tokens;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use access_control::ActiveUserData;
pub use config::IamConfig;
pub use issue::TokenPair;
pub use refresh_tokens::RefreshTokensUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
