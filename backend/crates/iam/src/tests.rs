//! End-to-end scenarios over the in-memory store
//!
//! Exercises the use cases wired together the way a caller would wire
//! them, with real Argon2 hashing and real JWT signing.

use std::sync::Arc;

use crate::application::config::IamConfig;
use crate::application::refresh_tokens::RefreshTokensUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::{ActiveUserData, TokenPair};
use crate::domain::value_object::{RefreshTokenId, UserId};
use crate::error::IamError;
use crate::hashing::Argon2Hashing;
use crate::infra::memory::InMemoryIamStore;
use crate::token::{JwtTokenSigner, TokenSigner};

const PASSWORD: &str = "IntegrationPass1!";

struct Fixture {
    store: Arc<InMemoryIamStore>,
    signer: Arc<JwtTokenSigner>,
    sign_up: SignUpUseCase<InMemoryIamStore, Argon2Hashing>,
    sign_in: SignInUseCase<InMemoryIamStore, Argon2Hashing, JwtTokenSigner, InMemoryIamStore>,
    refresh: RefreshTokensUseCase<InMemoryIamStore, JwtTokenSigner, InMemoryIamStore>,
}

impl Fixture {
    fn new() -> Self {
        let config = IamConfig::with_random_secret();
        let store = Arc::new(InMemoryIamStore::new());
        let hashing = Arc::new(Argon2Hashing::new(config.password_pepper.clone()));
        let signer = Arc::new(JwtTokenSigner::new(&config));

        let sign_up = SignUpUseCase::new(store.clone(), hashing.clone());
        let sign_in = SignInUseCase::new(
            store.clone(),
            hashing.clone(),
            signer.clone(),
            store.clone(),
        );
        let refresh = RefreshTokensUseCase::new(store.clone(), signer.clone(), store.clone());

        Self {
            store,
            signer,
            sign_up,
            sign_in,
            refresh,
        }
    }

    async fn register(&self, email: &str) -> UserId {
        self.sign_up
            .execute(SignUpInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
            .user_id
    }

    async fn login(&self, email: &str) -> TokenPair {
        self.sign_in
            .execute(SignInInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_sign_up_then_sign_in() {
    let fx = Fixture::new();
    fx.register("Alice@Example.com").await;

    // Email comparison is case-insensitive via normalization
    let pair = fx.login("alice@example.com").await;
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());

    let active = ActiveUserData::from_token(fx.signer.as_ref(), &pair.access_token).unwrap();
    assert_eq!(active.email, "alice@example.com");
}

#[tokio::test]
async fn test_duplicate_email_rejected_and_original_unaffected() {
    let fx = Fixture::new();
    fx.register("bob@example.com").await;

    let result = fx
        .sign_up
        .execute(SignUpInput {
            email: "bob@example.com".to_string(),
            password: "AnotherPass42!".to_string(),
        })
        .await;
    assert!(matches!(result, Err(IamError::EmailAlreadyExists)));

    // The original credentials still sign in
    fx.login("bob@example.com").await;
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let fx = Fixture::new();
    fx.register("carol@example.com").await;

    let wrong_password = fx
        .sign_in
        .execute(SignInInput {
            email: "carol@example.com".to_string(),
            password: "NotHerPassword1!".to_string(),
        })
        .await;
    assert!(matches!(wrong_password, Err(IamError::InvalidCredentials)));

    let unknown_email = fx
        .sign_in
        .execute(SignInInput {
            email: "nobody@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;
    assert!(matches!(unknown_email, Err(IamError::InvalidCredentials)));

    let malformed_email = fx
        .sign_in
        .execute(SignInInput {
            email: "not-an-email".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;
    assert!(matches!(malformed_email, Err(IamError::InvalidCredentials)));
}

#[tokio::test]
async fn test_refresh_rotates_and_replay_is_refused() {
    let fx = Fixture::new();
    fx.register("dave@example.com").await;

    let pair1 = fx.login("dave@example.com").await;
    let rti1 = fx.signer.verify_refresh(&pair1.refresh_token).unwrap().rti;

    // First refresh succeeds and rotates the session
    let pair2 = fx.refresh.execute(&pair1.refresh_token).await.unwrap();
    let rti2 = fx.signer.verify_refresh(&pair2.refresh_token).unwrap().rti;
    assert_ne!(rti1, rti2);

    // Replaying the rotated token is a replay, not a plain auth failure
    let replay = fx.refresh.execute(&pair1.refresh_token).await;
    assert!(matches!(replay, Err(IamError::AccessDenied)));

    // The current token keeps working
    let pair3 = fx.refresh.execute(&pair2.refresh_token).await.unwrap();
    let rti3 = fx.signer.verify_refresh(&pair3.refresh_token).unwrap().rti;
    assert_ne!(rti2, rti3);
    assert_ne!(rti1, rti3);
}

#[tokio::test]
async fn test_refresh_without_session_on_record() {
    let fx = Fixture::new();
    let user_id = fx.register("erin@example.com").await;

    // Well-signed refresh token for a user who never signed in: there is
    // no session to replay, so this is an ordinary auth failure
    let token = fx
        .signer
        .sign_refresh(&user_id, &RefreshTokenId::new())
        .unwrap();

    let result = fx.refresh.execute(&token).await;
    assert!(matches!(result, Err(IamError::InvalidCredentials)));
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let fx = Fixture::new();
    let user_id = fx.register("frank@example.com").await;
    let pair = fx.login("frank@example.com").await;

    fx.store.remove_user(&user_id);

    let result = fx.refresh.execute(&pair.refresh_token).await;
    assert!(matches!(result, Err(IamError::InvalidCredentials)));
}

#[tokio::test]
async fn test_foreign_and_garbage_refresh_tokens_rejected() {
    let fx = Fixture::new();
    fx.register("grace@example.com").await;
    let pair = fx.login("grace@example.com").await;

    // Token signed under a different secret
    let foreign = Fixture::new();
    foreign.register("grace@example.com").await;
    let foreign_pair = foreign.login("grace@example.com").await;
    assert!(matches!(
        fx.refresh.execute(&foreign_pair.refresh_token).await,
        Err(IamError::InvalidCredentials)
    ));

    assert!(matches!(
        fx.refresh.execute("definitely.not.a.token").await,
        Err(IamError::InvalidCredentials)
    ));

    // An access token is not a refresh token
    assert!(matches!(
        fx.refresh.execute(&pair.access_token).await,
        Err(IamError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_access_token_drives_access_control() {
    let fx = Fixture::new();
    fx.register("heidi@example.com").await;
    let pair = fx.login("heidi@example.com").await;

    let active = ActiveUserData::from_token(fx.signer.as_ref(), &pair.access_token).unwrap();
    assert_eq!(active.email, "heidi@example.com");
    assert!(active.permissions.is_empty());

    // A refresh token must not pass as an access token
    assert!(ActiveUserData::from_token(fx.signer.as_ref(), &pair.refresh_token).is_err());
}
