//! In-Memory Repository Implementations
//!
//! HashMap-backed store for tests and local development. One mutex guards
//! both maps so user creation and session rotation stay consistent; the
//! lock is never held across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::{RefreshTokenRegistry, UserRepository};
use crate::domain::value_object::{Email, RefreshTokenId, UserId};
use crate::error::{IamError, IamResult};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    /// user_id -> live refresh-token id
    sessions: HashMap<Uuid, Uuid>,
}

/// In-memory IAM store
#[derive(Clone, Default)]
pub struct InMemoryIamStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryIamStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked; the maps hold
        // plain values, so the data is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn remove_user(&self, user_id: &UserId) {
        let mut inner = self.lock();
        inner.users.remove(user_id.as_uuid());
        inner.sessions.remove(user_id.as_uuid());
    }
}

impl UserRepository for InMemoryIamStore {
    async fn create(&self, user: &User) -> IamResult<()> {
        let mut inner = self.lock();

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(IamError::EmailAlreadyExists);
        }

        inner.users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IamResult<Option<User>> {
        Ok(self.lock().users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> IamResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }
}

impl RefreshTokenRegistry for InMemoryIamStore {
    async fn insert(&self, user_id: &UserId, refresh_token_id: &RefreshTokenId) -> IamResult<()> {
        self.lock()
            .sessions
            .insert(*user_id.as_uuid(), *refresh_token_id.as_uuid());
        Ok(())
    }

    async fn validate(
        &self,
        user_id: &UserId,
        refresh_token_id: &RefreshTokenId,
    ) -> IamResult<bool> {
        match self.lock().sessions.get(user_id.as_uuid()) {
            Some(stored) if stored == refresh_token_id.as_uuid() => Ok(true),
            Some(_) => Err(IamError::InvalidatedRefreshToken),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;
    use crate::domain::value_object::UserPassword;

    fn user(email: &str) -> User {
        let email = Email::new(email).unwrap();
        let raw = RawPassword::new("StorePassword1!".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        User::new(email, hash)
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = InMemoryIamStore::new();
        store.create(&user("dup@example.com")).await.unwrap();

        let result = store.create(&user("dup@example.com")).await;
        assert!(matches!(result, Err(IamError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_find_by_email_and_id() {
        let store = InMemoryIamStore::new();
        let u = user("find@example.com");
        store.create(&u).await.unwrap();

        let by_email = store
            .find_by_email(&Email::new("find@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.map(|f| f.user_id), Some(u.user_id));

        let by_id = store.find_by_id(&u.user_id).await.unwrap();
        assert!(by_id.is_some());

        let missing = store.find_by_id(&UserId::new()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_registry_no_entry_is_not_a_replay() {
        let store = InMemoryIamStore::new();
        let user_id = UserId::new();

        let result = store.validate(&user_id, &RefreshTokenId::new()).await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn test_registry_mismatch_is_a_replay() {
        let store = InMemoryIamStore::new();
        let user_id = UserId::new();
        let live = RefreshTokenId::new();

        store.insert(&user_id, &live).await.unwrap();

        assert!(matches!(store.validate(&user_id, &live).await, Ok(true)));
        assert!(matches!(
            store.validate(&user_id, &RefreshTokenId::new()).await,
            Err(IamError::InvalidatedRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_registry_insert_replaces_previous() {
        let store = InMemoryIamStore::new();
        let user_id = UserId::new();
        let first = RefreshTokenId::new();
        let second = RefreshTokenId::new();

        store.insert(&user_id, &first).await.unwrap();
        store.insert(&user_id, &second).await.unwrap();

        assert!(matches!(store.validate(&user_id, &second).await, Ok(true)));
        assert!(matches!(
            store.validate(&user_id, &first).await,
            Err(IamError::InvalidatedRefreshToken)
        ));
    }
}
