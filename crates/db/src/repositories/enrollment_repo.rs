//! Repository for the `course_enrollments` table.

use lms_core::enrollment::clamp_progress;
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{
    CourseEnrollment, EnrollOutcome, EnrollmentDetail, EnrollmentDetailRow,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, student_id, status, enrolled_at, started_at, \
                       completed_at, progress_percentage, created_at, updated_at";

/// Enrollment columns joined with course, instructor and student.
/// Callers append `WHERE` / `ORDER BY` / `LIMIT`.
const DETAIL_SELECT: &str = "SELECT e.id, e.course_id, e.student_id, e.status, e.enrolled_at, \
        e.started_at, e.completed_at, e.progress_percentage, e.created_at, e.updated_at, \
        c.title AS course_title, c.status AS course_status, c.instructor_id, \
        i.name AS instructor_name, i.email AS instructor_email, \
        s.name AS student_name, s.email AS student_email \
     FROM course_enrollments e \
     JOIN courses c ON c.id = e.course_id \
     JOIN users i ON i.id = c.instructor_id \
     JOIN users s ON s.id = e.student_id";

const NEWEST_FIRST: &str = "ORDER BY e.created_at DESC, e.id ASC";

/// Provides enrollment operations.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Get-or-create the enrollment for `(course_id, student_id)`.
    ///
    /// The unique constraint decides which of several concurrent calls
    /// inserts; the others fall through to reading the winner's row.
    pub async fn enroll(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<EnrollOutcome, sqlx::Error> {
        let insert = format!(
            "INSERT INTO course_enrollments (course_id, student_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_course_enrollments_course_student DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, CourseEnrollment>(&insert)
            .bind(course_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await?;

        if let Some(enrollment) = inserted {
            tracing::info!(course_id, student_id, enrollment_id = enrollment.id, "Student enrolled");
            return Ok(EnrollOutcome {
                enrollment,
                created: true,
            });
        }

        let existing = format!(
            "SELECT {COLUMNS} FROM course_enrollments WHERE course_id = $1 AND student_id = $2"
        );
        let enrollment = sqlx::query_as::<_, CourseEnrollment>(&existing)
            .bind(course_id)
            .bind(student_id)
            .fetch_one(pool)
            .await?;
        Ok(EnrollOutcome {
            enrollment,
            created: false,
        })
    }

    /// Find the enrollment of `student_id` in `course_id`, if any.
    pub async fn find(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<Option<CourseEnrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_enrollments WHERE course_id = $1 AND student_id = $2"
        );
        sqlx::query_as::<_, CourseEnrollment>(&query)
            .bind(course_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `student_id` holds an enrollment (of any status) in `course_id`.
    pub async fn is_enrolled(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM course_enrollments WHERE course_id = $1 AND student_id = $2
            )",
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// All enrollments of a student with course and instructor, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<EnrollmentDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE e.student_id = $1 {NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, EnrollmentDetailRow>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EnrollmentDetail::from).collect())
    }

    /// The `limit` most recent enrollments across all courses.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<EnrollmentDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} {NEWEST_FIRST} LIMIT $1");
        let rows = sqlx::query_as::<_, EnrollmentDetailRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EnrollmentDetail::from).collect())
    }

    /// The `limit` most recent enrollments in courses taught by `instructor_id`.
    pub async fn list_recent_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
        limit: i64,
    ) -> Result<Vec<EnrollmentDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE c.instructor_id = $1 {NEWEST_FIRST} LIMIT $2");
        let rows = sqlx::query_as::<_, EnrollmentDetailRow>(&query)
            .bind(instructor_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EnrollmentDetail::from).collect())
    }

    /// Distinct students enrolled in any course taught by `instructor_id`.
    pub async fn count_students_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT e.student_id)
             FROM course_enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE c.instructor_id = $1",
        )
        .bind(instructor_id)
        .fetch_one(pool)
        .await
    }

    /// Number of enrollments in one course.
    pub async fn count_for_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM course_enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Store a progress value reported by an external content player,
    /// clamped to `0..=100`. Progress never moves backwards; status is left
    /// untouched.
    ///
    /// Returns `None` if the enrollment does not exist.
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        progress: i32,
    ) -> Result<Option<CourseEnrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE course_enrollments SET progress_percentage = GREATEST(progress_percentage, $2)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseEnrollment>(&query)
            .bind(id)
            .bind(clamp_progress(progress))
            .fetch_optional(pool)
            .await
    }
}
