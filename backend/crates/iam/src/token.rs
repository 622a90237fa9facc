//! Token Signing and Verification
//!
//! JWT (HS256) access and refresh tokens. The signer is a pure function of
//! its inputs plus process-wide config (secret, audience, issuer, TTLs);
//! it holds no mutable state. Revocation is not the token's job; that is
//! the refresh session registry's.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::IamConfig;
use crate::domain::entity::User;
use crate::domain::value_object::{Permission, RefreshTokenId, Role, UserId};
use crate::error::{IamError, IamResult};

/// Claims asserted by a short-lived access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub aud: String,
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
    pub iat: i64,
    pub exp: i64,
}

/// Claims asserted by a longer-lived refresh token
///
/// Self-describing but not self-validating: `rti` must still match the
/// registry entry for `sub` to be usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub iss: String,
    pub aud: String,
    /// User id
    pub sub: Uuid,
    /// Refresh token id
    pub rti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Token signing/verification seam
///
/// Any verification failure (signature, audience, issuer, expiry,
/// malformed claims) is reported as `InvalidCredentials`; callers must not
/// be able to distinguish the cases.
pub trait TokenSigner: Send + Sync {
    fn sign_access(&self, user: &User) -> IamResult<String>;
    fn sign_refresh(&self, user_id: &UserId, refresh_token_id: &RefreshTokenId)
    -> IamResult<String>;
    fn verify_access(&self, token: &str) -> IamResult<AccessTokenClaims>;
    fn verify_refresh(&self, token: &str) -> IamResult<RefreshTokenClaims>;
}

/// HS256 JWT signer configured from [`IamConfig`]
pub struct JwtTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: String,
    issuer: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtTokenSigner {
    pub fn new(config: &IamConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            audience: config.audience.clone(),
            issuer: config.issuer.clone(),
            access_ttl_secs: config.access_token_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_token_ttl.as_secs() as i64,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        // Tokens are short-lived; no clock-skew allowance
        validation.leeway = 0;
        validation
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign_access(&self, user: &User) -> IamResult<String> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            role: user.role,
            permissions: user.permissions.clone(),
            iat: now,
            exp: now + self.access_ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IamError::TokenCreation(e.to_string()))
    }

    fn sign_refresh(
        &self,
        user_id: &UserId,
        refresh_token_id: &RefreshTokenId,
    ) -> IamResult<String> {
        let now = Utc::now().timestamp();
        let claims = RefreshTokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: *user_id.as_uuid(),
            rti: *refresh_token_id.as_uuid(),
            iat: now,
            exp: now + self.refresh_ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IamError::TokenCreation(e.to_string()))
    }

    fn verify_access(&self, token: &str) -> IamResult<AccessTokenClaims> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|_| IamError::InvalidCredentials)
    }

    fn verify_refresh(&self, token: &str) -> IamResult<RefreshTokenClaims> {
        decode::<RefreshTokenClaims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|_| IamError::InvalidCredentials)
    }
}
