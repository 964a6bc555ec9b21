//! Repository for the `assessment_questions` table.

use lms_core::assessment::validate_question;
use lms_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::assessment::{AssessmentQuestion, CreateAssessmentQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, assessment_id, question, image_path, options, correct_answer, \
                       points, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for assessment questions.
pub struct AssessmentQuestionRepo;

impl AssessmentQuestionRepo {
    /// Insert a new question after checking that `correct_answer` indexes
    /// into `options`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssessmentQuestion,
    ) -> Result<AssessmentQuestion, DbError> {
        validate_question(&input.options, input.correct_answer)?;

        let query = format!(
            "INSERT INTO assessment_questions
                (assessment_id, question, image_path, options, correct_answer, points,
                 sort_order, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 1), COALESCE($7, 0), COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, AssessmentQuestion>(&query)
            .bind(input.assessment_id)
            .bind(&input.question)
            .bind(&input.image_path)
            .bind(Json(&input.options))
            .bind(input.correct_answer)
            .bind(input.points)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(question)
    }

    /// All questions of an assessment in display order.
    pub async fn list_for_assessment(
        pool: &PgPool,
        assessment_id: DbId,
    ) -> Result<Vec<AssessmentQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_questions
             WHERE assessment_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, AssessmentQuestion>(&query)
            .bind(assessment_id)
            .fetch_all(pool)
            .await
    }
}
