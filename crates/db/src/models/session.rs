//! Refresh-token sessions.

use lms_core::roles::Role;
use lms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::User;

/// A row from `user_sessions`.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}

/// The user a session belongs to, as returned with a token pair.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Deactivated users keep their rows but may not open sessions.
    #[serde(skip)]
    pub is_active: bool,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
        }
    }
}
