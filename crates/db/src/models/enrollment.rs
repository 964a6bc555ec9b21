//! Course enrollment model and joined views.

use lms_core::course::CourseStatus;
use lms_core::enrollment::EnrollmentStatus;
use lms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `course_enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollment {
    pub id: DbId,
    pub course_id: DbId,
    pub student_id: DbId,
    pub status: EnrollmentStatus,
    pub enrolled_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub progress_percentage: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outcome of the idempotent enroll step.
#[derive(Debug, Clone)]
pub struct EnrollOutcome {
    pub enrollment: CourseEnrollment,
    /// `false` when the row already existed and was returned unchanged.
    pub created: bool,
}

/// Flat row joining an enrollment with its course, the course's
/// instructor, and the student.
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentDetailRow {
    #[sqlx(flatten)]
    pub enrollment: CourseEnrollment,
    pub course_title: String,
    pub course_status: CourseStatus,
    pub instructor_id: DbId,
    pub instructor_name: String,
    pub instructor_email: String,
    pub student_name: String,
    pub student_email: String,
}

/// The course side of an enrollment listing.
#[derive(Debug, Clone, Serialize)]
pub struct CourseBrief {
    pub id: DbId,
    pub title: String,
    pub status: CourseStatus,
    pub instructor: UserSummary,
}

/// An enrollment with its course (and instructor) and student.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: CourseEnrollment,
    pub course: CourseBrief,
    pub student: UserSummary,
}

impl From<EnrollmentDetailRow> for EnrollmentDetail {
    fn from(row: EnrollmentDetailRow) -> Self {
        let course = CourseBrief {
            id: row.enrollment.course_id,
            title: row.course_title,
            status: row.course_status,
            instructor: UserSummary {
                id: row.instructor_id,
                name: row.instructor_name,
                email: row.instructor_email,
            },
        };
        let student = UserSummary {
            id: row.enrollment.student_id,
            name: row.student_name,
            email: row.student_email,
        };
        Self {
            enrollment: row.enrollment,
            course,
            student,
        }
    }
}
