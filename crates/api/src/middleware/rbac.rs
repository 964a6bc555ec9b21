//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Ownership checks need the target row and live in
//! the handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lms_core::policy::authorize_create_course;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role allowed to author courses (administrator or instructor).
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn create(RequireCourseAuthor(user): RequireCourseAuthor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCourseAuthor(pub AuthUser);

impl FromRequestParts<AppState> for RequireCourseAuthor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize_create_course(&user.viewer())?;
        Ok(RequireCourseAuthor(user))
    }
}
