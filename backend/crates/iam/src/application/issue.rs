//! Token Pair Issuance
//!
//! Shared issuance path for sign-in and refresh. Every issuance mints a
//! fresh refresh-token id and records it in the registry, unconditionally
//! replacing the previous one for that user.

use crate::domain::entity::User;
use crate::domain::repository::RefreshTokenRegistry;
use crate::domain::value_object::RefreshTokenId;
use crate::error::IamResult;
use crate::token::TokenSigner;

/// Access/refresh token pair returned by sign-in and refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign both tokens, then register the new refresh-token id.
///
/// Ordering matters: the registry write happens after both tokens are
/// signed, so a signing failure never invalidates the user's current
/// session. A registry write failure propagates and the signed tokens are
/// dropped unreturned.
pub(crate) async fn issue_token_pair<S, R>(
    signer: &S,
    registry: &R,
    user: &User,
) -> IamResult<TokenPair>
where
    S: TokenSigner,
    R: RefreshTokenRegistry,
{
    let refresh_token_id = RefreshTokenId::new();

    let access_token = signer.sign_access(user)?;
    let refresh_token = signer.sign_refresh(&user.user_id, &refresh_token_id)?;

    registry.insert(&user.user_id, &refresh_token_id).await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
