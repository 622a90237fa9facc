//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::{RefreshTokenRegistry, UserRepository};
use crate::domain::value_object::{
    Email, Permission, RefreshTokenId, Role, UserId, UserPassword,
};
use crate::error::{IamError, IamResult};

/// Postgres unique-constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed IAM store
#[derive(Clone)]
pub struct PgIamStore {
    pool: PgPool,
}

impl PgIamStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgIamStore {
    async fn create(&self, user: &User) -> IamResult<()> {
        let permissions: Vec<String> = user
            .permissions
            .iter()
            .map(|p| p.code().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                user_role,
                permissions,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .bind(&permissions)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                IamError::EmailAlreadyExists
            }
            _ => IamError::Store(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IamResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                permissions,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> IamResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                permissions,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Refresh Token Registry Implementation
// ============================================================================

impl RefreshTokenRegistry for PgIamStore {
    async fn insert(&self, user_id: &UserId, refresh_token_id: &RefreshTokenId) -> IamResult<()> {
        // Single-row upsert keyed by user_id; the row swap is atomic, so a
        // concurrent validate sees either the old id or the new one, never
        // a torn state
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (user_id, token_id, rotated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                token_id = EXCLUDED.token_id,
                rotated_at = EXCLUDED.rotated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(refresh_token_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn validate(
        &self,
        user_id: &UserId,
        refresh_token_id: &RefreshTokenId,
    ) -> IamResult<bool> {
        let stored = sqlx::query_scalar::<_, Uuid>(
            "SELECT token_id FROM refresh_sessions WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match stored {
            Some(token_id) if token_id == *refresh_token_id.as_uuid() => Ok(true),
            Some(_) => Err(IamError::InvalidatedRefreshToken),
            None => Ok(false),
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    user_role: i16,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> IamResult<User> {
        let role = Role::from_id(self.user_role)
            .ok_or_else(|| IamError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| IamError::Internal(format!("Invalid password hash: {}", e)))?;

        let permissions = self
            .permissions
            .iter()
            .map(|code| {
                Permission::from_code(code)
                    .ok_or_else(|| IamError::Internal(format!("Invalid permission: {}", code)))
            })
            .collect::<IamResult<Vec<_>>>()?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            role,
            permissions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
