//! Enrollment status and the eligibility rules for enrolling.
//!
//! Enrollment itself is get-or-create keyed on `(course_id, student_id)`;
//! the storage layer owns that step. This module decides whether the
//! attempt may proceed at all.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::course::CourseStatus;
use crate::types::DbId;
use crate::viewer::Viewer;

/// A student's relationship to a course.
///
/// Rows are created as `Enrolled`. Moving to `InProgress`, `Completed` or
/// `Dropped` is driven by events outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "enrollment_status", rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Enrolled,
    InProgress,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::InProgress => "in_progress",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress is stored as an integer percentage.
pub const PROGRESS_MIN: i32 = 0;
pub const PROGRESS_MAX: i32 = 100;

/// Why an enroll attempt was refused. These are soft failures: the caller
/// reports the message and nothing is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentRejection {
    #[error("Only students can enroll in courses.")]
    NotAStudent,
    #[error("This course is not available for enrollment.")]
    NotPublished,
}

impl EnrollmentRejection {
    /// Short machine-readable reason.
    pub fn code(self) -> &'static str {
        match self {
            EnrollmentRejection::NotAStudent => "not_a_student",
            EnrollmentRejection::NotPublished => "not_published",
        }
    }
}

/// Check that `viewer` may enroll in a course with `status`.
///
/// Returns the student id to enroll. The role check runs first, then the
/// publication check. Whether an enrollment already exists is not a
/// rejection; the get-or-create step returns the existing row.
pub fn check_enrollment(viewer: &Viewer, status: CourseStatus) -> Result<DbId, EnrollmentRejection> {
    let student_id = viewer
        .student_id()
        .ok_or(EnrollmentRejection::NotAStudent)?;
    if !status.is_published() {
        return Err(EnrollmentRejection::NotPublished);
    }
    Ok(student_id)
}

/// Clamp a progress value into `0..=100`.
pub fn clamp_progress(value: i32) -> i32 {
    value.clamp(PROGRESS_MIN, PROGRESS_MAX)
}
