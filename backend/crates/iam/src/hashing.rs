//! Hashing Service
//!
//! Trait seam for password hashing so use cases do not depend on a
//! concrete algorithm. The production implementation is Argon2id via
//! `platform::password`, with an optional application-wide pepper.

use crate::domain::value_object::{RawPassword, UserPassword};
use crate::error::{IamError, IamResult};

/// One-way password hashing with constant-time verification.
///
/// `hash` is non-deterministic (random salt). `verify` returns `false` on
/// mismatch and never errors for well-formed inputs.
pub trait HashingService: Send + Sync {
    fn hash(&self, raw: &RawPassword) -> IamResult<UserPassword>;
    fn verify(&self, raw: &RawPassword, hash: &UserPassword) -> bool;
}

/// Argon2id-backed hashing service
#[derive(Default, Clone)]
pub struct Argon2Hashing {
    pepper: Option<Vec<u8>>,
}

impl Argon2Hashing {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self { pepper }
    }

    fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_deref()
    }
}

impl HashingService for Argon2Hashing {
    fn hash(&self, raw: &RawPassword) -> IamResult<UserPassword> {
        UserPassword::from_raw(raw, self.pepper())
            .map_err(|e| IamError::Internal(e.to_string()))
    }

    fn verify(&self, raw: &RawPassword, hash: &UserPassword) -> bool {
        hash.verify(raw, self.pepper())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashing = Argon2Hashing::default();
        let raw = RawPassword::new("CorrectHorse9!".to_string()).unwrap();
        let hash = hashing.hash(&raw).unwrap();

        assert!(hashing.verify(&raw, &hash));

        let other = RawPassword::new("WrongStaple42!".to_string()).unwrap();
        assert!(!hashing.verify(&other, &hash));
    }

    #[test]
    fn test_pepper_must_match() {
        let with_pepper = Argon2Hashing::new(Some(b"pepper".to_vec()));
        let without = Argon2Hashing::default();

        let raw = RawPassword::new("CorrectHorse9!".to_string()).unwrap();
        let hash = with_pepper.hash(&raw).unwrap();

        assert!(with_pepper.verify(&raw, &hash));
        assert!(!without.verify(&raw, &hash));
    }
}
