//! Repository for the `student_assessments` table.

use lms_core::assessment::{score_attempt, ScoredQuestion};
use lms_core::error::CoreError;
use lms_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::student_assessment::{CreateStudentAssessment, StudentAssessment};
use crate::repositories::{AssessmentQuestionRepo, AssessmentRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, assessment_id, student_id, answers, score, total_points, \
                       percentage, passed, started_at, completed_at, time_taken, \
                       created_at, updated_at";

/// Provides operations for submitted assessment attempts.
pub struct StudentAssessmentRepo;

impl StudentAssessmentRepo {
    /// Score and record an attempt.
    ///
    /// `score`, `total_points`, `percentage` and `passed` are derived from
    /// the assessment's current questions; `time_taken` is the whole
    /// minutes between `started_at` and `completed_at`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStudentAssessment,
    ) -> Result<StudentAssessment, DbError> {
        if input.completed_at < input.started_at {
            return Err(CoreError::Validation(
                "completed_at must not be before started_at".into(),
            )
            .into());
        }

        let assessment = AssessmentRepo::find_by_id(pool, input.assessment_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Assessment",
                id: input.assessment_id,
            })?;
        let questions: Vec<ScoredQuestion> =
            AssessmentQuestionRepo::list_for_assessment(pool, assessment.id)
                .await?
                .iter()
                .map(|q| q.scored())
                .collect();

        let result = score_attempt(&questions, &input.answers, assessment.passing_score);
        let minutes = (input.completed_at - input.started_at).num_minutes();
        let time_taken = i32::try_from(minutes).unwrap_or(i32::MAX);

        let query = format!(
            "INSERT INTO student_assessments
                (assessment_id, student_id, answers, score, total_points, percentage, passed,
                 started_at, completed_at, time_taken)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let attempt = sqlx::query_as::<_, StudentAssessment>(&query)
            .bind(input.assessment_id)
            .bind(input.student_id)
            .bind(Json(&input.answers))
            .bind(result.score)
            .bind(result.total_points)
            .bind(result.percentage)
            .bind(result.passed)
            .bind(input.started_at)
            .bind(input.completed_at)
            .bind(time_taken)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            attempt_id = attempt.id,
            assessment_id = attempt.assessment_id,
            student_id = attempt.student_id,
            passed = attempt.passed,
            "Assessment attempt recorded",
        );
        Ok(attempt)
    }

    /// A student's attempts at one assessment, most recent first.
    pub async fn list_for_student(
        pool: &PgPool,
        assessment_id: DbId,
        student_id: DbId,
    ) -> Result<Vec<StudentAssessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM student_assessments
             WHERE assessment_id = $1 AND student_id = $2
             ORDER BY completed_at DESC, id DESC"
        );
        sqlx::query_as::<_, StudentAssessment>(&query)
            .bind(assessment_id)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }
}
