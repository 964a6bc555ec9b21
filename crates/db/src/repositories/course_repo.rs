//! Repository for the `courses` table.

use lms_core::course::CourseStatus;
use lms_core::pagination::page_offset;
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{
    Course, CourseScope, CourseSummary, CourseSummaryRow, CreateCourse, UpdateCourse,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, instructor_id, status, duration_hours, \
                       start_date, end_date, created_at, updated_at";

/// Course columns joined with the instructor and an enrollment count.
/// Callers append `WHERE` / `ORDER BY` / `LIMIT`.
const SUMMARY_SELECT: &str = "SELECT c.id, c.title, c.description, c.instructor_id, c.status, \
        c.duration_hours, c.start_date, c.end_date, c.created_at, c.updated_at, \
        u.name AS instructor_name, u.email AS instructor_email, \
        (SELECT COUNT(*) FROM course_enrollments e WHERE e.course_id = c.id) AS enrollments_count \
     FROM courses c \
     JOIN users u ON u.id = c.instructor_id";

/// Newest first; rows created in the same instant keep insertion order.
const NEWEST_FIRST: &str = "ORDER BY c.created_at DESC, c.id ASC";

/// Scope filter over `c`, parameterised as `$1` (instructor) and `$2` (status).
const SCOPE_FILTER: &str = "($1::BIGINT IS NULL OR c.instructor_id = $1) \
                            AND ($2::course_status IS NULL OR c.status = $2)";

fn scope_binds(scope: CourseScope) -> (Option<DbId>, Option<CourseStatus>) {
    match scope {
        CourseScope::All => (None, None),
        CourseScope::OwnedBy(id) => (Some(id), None),
        CourseScope::Published => (None, Some(CourseStatus::Published)),
    }
}

/// Provides CRUD and listing operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (title, description, instructor_id, status, duration_hours, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.instructor_id)
            .bind(input.status)
            .bind(input.duration_hours)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course with its instructor and enrollment count.
    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<CourseSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CourseSummaryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(CourseSummary::from))
    }

    /// Replace the editable fields of a course.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = $2,
                description = $3,
                status = $4,
                duration_hours = $5,
                start_date = $6,
                end_date = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.duration_hours)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a course. Materials, assessments (and their
    /// questions and attempts) and enrollments go with it by cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of courses within `scope`, newest first, plus the total
    /// number of matching courses.
    pub async fn list_page(
        pool: &PgPool,
        scope: CourseScope,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<CourseSummary>, i64), sqlx::Error> {
        let (instructor_id, status) = scope_binds(scope);

        let count_query = format!("SELECT COUNT(*) FROM courses c WHERE {SCOPE_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(instructor_id)
            .bind(status)
            .fetch_one(pool)
            .await?;

        let query =
            format!("{SUMMARY_SELECT} WHERE {SCOPE_FILTER} {NEWEST_FIRST} LIMIT $3 OFFSET $4");
        let rows = sqlx::query_as::<_, CourseSummaryRow>(&query)
            .bind(instructor_id)
            .bind(status)
            .bind(per_page)
            .bind(page_offset(page, per_page))
            .fetch_all(pool)
            .await?;

        Ok((rows.into_iter().map(CourseSummary::from).collect(), total))
    }

    /// Every course taught by `instructor_id`, newest first.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE c.instructor_id = $1 {NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, CourseSummaryRow>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CourseSummary::from).collect())
    }

    /// The `limit` most recently created courses of any status.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} {NEWEST_FIRST} LIMIT $1");
        let rows = sqlx::query_as::<_, CourseSummaryRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CourseSummary::from).collect())
    }

    /// Published courses `student_id` has no enrollment in, newest first.
    pub async fn list_available_for_student(
        pool: &PgPool,
        student_id: DbId,
        limit: i64,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE c.status = 'published'
               AND NOT EXISTS (
                   SELECT 1 FROM course_enrollments e
                   WHERE e.course_id = c.id AND e.student_id = $1
               )
             {NEWEST_FIRST}
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, CourseSummaryRow>(&query)
            .bind(student_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CourseSummary::from).collect())
    }

    /// Total number of courses of any status.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await
    }

    /// Number of courses with `status`.
    pub async fn count_by_status(pool: &PgPool, status: CourseStatus) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
