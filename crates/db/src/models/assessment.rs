//! Assessment and assessment question models and DTOs.

use lms_core::assessment::{AssessmentType, ScoredQuestion};
use lms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `assessments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assessment {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    /// Minutes; `None` means untimed.
    pub time_limit: Option<i32>,
    pub passing_score: i32,
    pub show_results: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An assessment as listed on the course page, with its point total.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssessmentSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Sum of points over active questions.
    pub total_points: i64,
}

/// DTO for creating an assessment.
#[derive(Debug, Clone)]
pub struct CreateAssessment {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub time_limit: Option<i32>,
    /// Defaults to 70 if omitted.
    pub passing_score: Option<i32>,
    pub show_results: Option<bool>,
    pub is_active: Option<bool>,
}

/// A row from the `assessment_questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssessmentQuestion {
    pub id: DbId,
    pub assessment_id: DbId,
    pub question: String,
    pub image_path: Option<String>,
    pub options: Json<Vec<String>>,
    /// Zero-based index into `options`.
    pub correct_answer: i32,
    pub points: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssessmentQuestion {
    pub fn scored(&self) -> ScoredQuestion {
        ScoredQuestion {
            correct_answer: self.correct_answer,
            points: self.points,
            is_active: self.is_active,
        }
    }
}

/// DTO for adding a question to an assessment.
#[derive(Debug, Clone)]
pub struct CreateAssessmentQuestion {
    pub assessment_id: DbId,
    pub question: String,
    pub image_path: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: i32,
    /// Defaults to 1 if omitted.
    pub points: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
