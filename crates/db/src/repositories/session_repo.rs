//! Repository for the `user_sessions` table.
//!
//! A refresh token is single-use: [`SessionRepo::claim`] revokes the
//! session it names in the same statement that reads it, so two requests
//! racing with the same token cannot both succeed.

use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, SessionUser, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                       created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Store a new session for a freshly issued refresh token.
    pub async fn open(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await?;
        tracing::debug!(session_id = session.id, user_id = session.user_id, "Session opened");
        Ok(session)
    }

    /// Revoke the live session holding `refresh_token_hash` and return its
    /// owner. `None` when the token is unknown, expired, or already used.
    pub async fn claim(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<SessionUser>, sqlx::Error> {
        sqlx::query_as::<_, SessionUser>(
            "WITH claimed AS (
                 UPDATE user_sessions SET is_revoked = true
                 WHERE refresh_token_hash = $1
                   AND is_revoked = false
                   AND expires_at > NOW()
                 RETURNING user_id
             )
             SELECT u.id, u.name, u.email, u.role, u.is_active
             FROM claimed JOIN users u ON u.id = claimed.user_id",
        )
        .bind(refresh_token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
