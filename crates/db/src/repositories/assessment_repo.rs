//! Repository for the `assessments` table.

use lms_core::assessment::{validate_passing_score, DEFAULT_PASSING_SCORE};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::assessment::{Assessment, AssessmentSummary, CreateAssessment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, description, type, time_limit, passing_score, \
                       show_results, is_active, created_at, updated_at";

/// Provides CRUD operations for assessments.
pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Insert a new assessment after checking the passing score.
    pub async fn create(pool: &PgPool, input: &CreateAssessment) -> Result<Assessment, DbError> {
        let passing_score = input.passing_score.unwrap_or(DEFAULT_PASSING_SCORE);
        validate_passing_score(passing_score)?;

        let query = format!(
            "INSERT INTO assessments
                (course_id, title, description, type, time_limit, passing_score,
                 show_results, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        let assessment = sqlx::query_as::<_, Assessment>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assessment_type)
            .bind(input.time_limit)
            .bind(passing_score)
            .bind(input.show_results)
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(assessment)
    }

    /// Find an assessment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active assessments of a course with their point totals, pre-tests
    /// before post-tests.
    pub async fn list_active_summaries_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<AssessmentSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COALESCE(SUM(q.points), 0)::BIGINT FROM assessment_questions q
                 WHERE q.assessment_id = assessments.id AND q.is_active = true) AS total_points
             FROM assessments
             WHERE course_id = $1 AND is_active = true
             ORDER BY type ASC, id ASC"
        );
        sqlx::query_as::<_, AssessmentSummary>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Sum of points over the assessment's active questions.
    pub async fn total_points(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(points), 0)::BIGINT FROM assessment_questions
             WHERE assessment_id = $1 AND is_active = true",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
