//! Refresh Tokens Use Case
//!
//! Rotates a refresh token: the presented token is verified, checked
//! against the registry, and replaced by a freshly minted pair. A rotated
//! token presented again is treated as a replay and refused with
//! `AccessDenied`, which callers surface as 403 rather than 401.

use std::sync::Arc;

use crate::application::issue::{TokenPair, issue_token_pair};
use crate::domain::repository::{RefreshTokenRegistry, UserRepository};
use crate::domain::value_object::{RefreshTokenId, UserId};
use crate::error::{IamError, IamResult};
use crate::token::TokenSigner;

/// Refresh tokens use case
pub struct RefreshTokensUseCase<U, S, R>
where
    U: UserRepository,
    S: TokenSigner,
    R: RefreshTokenRegistry,
{
    user_repo: Arc<U>,
    signer: Arc<S>,
    registry: Arc<R>,
}

impl<U, S, R> RefreshTokensUseCase<U, S, R>
where
    U: UserRepository,
    S: TokenSigner,
    R: RefreshTokenRegistry,
{
    pub fn new(user_repo: Arc<U>, signer: Arc<S>, registry: Arc<R>) -> Self {
        Self {
            user_repo,
            signer,
            registry,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> IamResult<TokenPair> {
        let claims = self.signer.verify_refresh(refresh_token)?;

        let user_id = UserId::from_uuid(claims.sub);
        let refresh_token_id = RefreshTokenId::from_uuid(claims.rti);

        // The user may have been deleted after the token was issued
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(IamError::InvalidCredentials)?;

        match self.registry.validate(&user_id, &refresh_token_id).await {
            Ok(true) => {}
            // No session on record: signed but stale, not a replay
            Ok(false) => return Err(IamError::InvalidCredentials),
            Err(IamError::InvalidatedRefreshToken) => {
                tracing::warn!(
                    user_id = %user_id,
                    "Refresh token reuse detected, session invalidated"
                );
                return Err(IamError::AccessDenied);
            }
            Err(e) => return Err(e),
        }

        let pair = issue_token_pair(self.signer.as_ref(), self.registry.as_ref(), &user).await?;

        tracing::info!(user_id = %user_id, "Refresh tokens rotated");

        Ok(pair)
    }
}
