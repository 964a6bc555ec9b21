//! Handler for `POST /courses/enroll`.
//!
//! Policy rejections are soft: they come back as `200` with
//! `enrolled: false` and a message, and nothing is written.

use axum::extract::State;
use axum::Json;
use lms_core::enrollment::check_enrollment;
use lms_core::error::CoreError;
use lms_core::types::DbId;
use lms_db::models::enrollment::CourseEnrollment;
use lms_db::repositories::{CourseRepo, EnrollmentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /courses/enroll`.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: DbId,
}

/// Outcome reported back to the client.
#[derive(Debug, Serialize)]
pub struct EnrollResult {
    pub enrolled: bool,
    pub message: String,
    /// Machine-readable rejection reason; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<CourseEnrollment>,
}

/// POST /api/v1/courses/enroll
pub async fn store(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<EnrollRequest>,
) -> AppResult<Json<DataResponse<EnrollResult>>> {
    let course = CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }))?;

    let student_id = match check_enrollment(&user.viewer(), course.status) {
        Ok(student_id) => student_id,
        Err(rejection) => {
            tracing::info!(
                course_id = course.id,
                user_id = user.user_id,
                reason = rejection.code(),
                "Enrollment rejected",
            );
            return Ok(Json(DataResponse {
                data: EnrollResult {
                    enrolled: false,
                    message: rejection.to_string(),
                    reason: Some(rejection.code()),
                    enrollment: None,
                },
            }));
        }
    };

    let outcome = EnrollmentRepo::enroll(&state.pool, course.id, student_id).await?;
    let message = if outcome.created {
        "Successfully enrolled in the course."
    } else {
        "You are already enrolled in this course."
    };

    Ok(Json(DataResponse {
        data: EnrollResult {
            enrolled: true,
            message: message.to_string(),
            reason: None,
            enrollment: Some(outcome.enrollment),
        },
    }))
}
