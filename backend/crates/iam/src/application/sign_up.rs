//! Sign Up Use Case
//!
//! Creates a new user account with a hashed credential.

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserId};
use crate::error::{IamError, IamResult};
use crate::hashing::HashingService;

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, H>
where
    U: UserRepository,
    H: HashingService,
{
    user_repo: Arc<U>,
    hashing: Arc<H>,
}

impl<U, H> SignUpUseCase<U, H>
where
    U: UserRepository,
    H: HashingService,
{
    pub fn new(user_repo: Arc<U>, hashing: Arc<H>) -> Self {
        Self { user_repo, hashing }
    }

    pub async fn execute(&self, input: SignUpInput) -> IamResult<SignUpOutput> {
        // Validate email
        let email =
            Email::new(&input.email).map_err(|e| IamError::Validation(e.to_string()))?;

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| IamError::PasswordPolicy(e.to_string()))?;
        let password_hash = self.hashing.hash(&raw_password)?;

        // Create and persist; the unique email constraint is enforced by
        // the store, so concurrent sign-ups race safely
        let user = User::new(email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
        })
    }
}
