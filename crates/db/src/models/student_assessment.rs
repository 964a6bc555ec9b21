//! Submitted assessment attempt model and DTOs.

use lms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `student_assessments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentAssessment {
    pub id: DbId,
    pub assessment_id: DbId,
    pub student_id: DbId,
    /// Selected option index per question, in question order.
    pub answers: Json<Vec<i32>>,
    pub score: i64,
    pub total_points: i64,
    pub percentage: f64,
    pub passed: bool,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
    /// Minutes.
    pub time_taken: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an attempt. Score fields are derived by the
/// repository from the assessment's questions.
#[derive(Debug, Clone)]
pub struct CreateStudentAssessment {
    pub assessment_id: DbId,
    pub student_id: DbId,
    pub answers: Vec<i32>,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
}
