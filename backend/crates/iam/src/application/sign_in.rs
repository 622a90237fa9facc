//! Sign In Use Case
//!
//! Verifies a credential pair and issues a token pair. All failure paths
//! collapse into `InvalidCredentials` so a caller cannot probe which
//! emails are registered.

use std::sync::Arc;

use crate::application::issue::{TokenPair, issue_token_pair};
use crate::domain::repository::{RefreshTokenRegistry, UserRepository};
use crate::domain::value_object::{Email, RawPassword};
use crate::error::{IamError, IamResult};
use crate::hashing::HashingService;
use crate::token::TokenSigner;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, H, S, R>
where
    U: UserRepository,
    H: HashingService,
    S: TokenSigner,
    R: RefreshTokenRegistry,
{
    user_repo: Arc<U>,
    hashing: Arc<H>,
    signer: Arc<S>,
    registry: Arc<R>,
}

impl<U, H, S, R> SignInUseCase<U, H, S, R>
where
    U: UserRepository,
    H: HashingService,
    S: TokenSigner,
    R: RefreshTokenRegistry,
{
    pub fn new(user_repo: Arc<U>, hashing: Arc<H>, signer: Arc<S>, registry: Arc<R>) -> Self {
        Self {
            user_repo,
            hashing,
            signer,
            registry,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> IamResult<TokenPair> {
        // A malformed email cannot belong to any account
        let email = Email::new(&input.email).map_err(|_| IamError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| IamError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(IamError::InvalidCredentials)?;

        if !self.hashing.verify(&raw_password, &user.password_hash) {
            tracing::warn!(user_id = %user.user_id, "Sign in failed: wrong password");
            return Err(IamError::InvalidCredentials);
        }

        let pair = issue_token_pair(self.signer.as_ref(), self.registry.as_ref(), &user).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(pair)
    }
}
