//! Application Configuration
//!
//! Configuration for the IAM application layer.

use std::time::Duration;

/// IAM application configuration
#[derive(Debug, Clone)]
pub struct IamConfig {
    /// HS256 signing secret (32 bytes)
    pub jwt_secret: Vec<u8>,
    /// Token audience claim
    pub audience: String,
    /// Token issuer claim
    pub issuer: String,
    /// Access token TTL (5 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token TTL (1 week)
    pub refresh_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for IamConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            audience: "localhost:3000".to_string(),
            issuer: "localhost:3000".to_string(),
            access_token_ttl: Duration::from_secs(300), // 5 minutes
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            password_pepper: None,
        }
    }
}

impl IamConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttls() {
        let config = IamConfig::default();
        assert_eq!(config.access_token_ttl, Duration::from_secs(300));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(604_800));
    }

    #[test]
    fn test_random_secret_is_not_zeroed() {
        let config = IamConfig::with_random_secret();
        assert_eq!(config.jwt_secret.len(), 32);
        assert_ne!(config.jwt_secret, vec![0u8; 32]);
    }
}
