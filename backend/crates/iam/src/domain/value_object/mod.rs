//! Value Objects

pub mod email;
pub mod permission;
pub mod refresh_token_id;
pub mod role;
pub mod user_id;
pub mod user_password;

pub use email::Email;
pub use permission::Permission;
pub use refresh_token_id::RefreshTokenId;
pub use role::Role;
pub use user_id::UserId;
pub use user_password::{RawPassword, UserPassword};
