//! Refresh Token Id
//!
//! Random identifier embedded in a refresh token and tracked by the
//! session registry. UUIDv4, so 122 bits of entropy, unguessable.

use kernel::id::Id;

pub struct RefreshTokenMarker;
pub type RefreshTokenId = Id<RefreshTokenMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_id_is_v4() {
        let id = RefreshTokenId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_refresh_token_ids_are_unique() {
        assert_ne!(RefreshTokenId::new(), RefreshTokenId::new());
    }
}
