//! Assessment types and attempt scoring.
//!
//! There is no grading workflow here; [`score_attempt`] only derives the
//! stored result fields (`score`, `total_points`, `percentage`, `passed`)
//! from a set of questions and the selected answer indices.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default minimum percentage needed to pass.
pub const DEFAULT_PASSING_SCORE: i32 = 70;

/// When an assessment is taken relative to the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "assessment_type", rename_all = "snake_case")]
pub enum AssessmentType {
    PreTest,
    PostTest,
}

/// The parts of a question that scoring needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredQuestion {
    pub correct_answer: i32,
    pub points: i32,
    pub is_active: bool,
}

/// Derived result of one submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptScore {
    pub score: i64,
    pub total_points: i64,
    pub percentage: f64,
    pub passed: bool,
}

/// Check that `correct_answer` is a valid index into `options`.
pub fn validate_question(options: &[String], correct_answer: i32) -> Result<(), CoreError> {
    if options.is_empty() {
        return Err(CoreError::Validation(
            "A question needs at least one option".into(),
        ));
    }
    let in_range = usize::try_from(correct_answer)
        .map(|idx| idx < options.len())
        .unwrap_or(false);
    if !in_range {
        return Err(CoreError::Validation(format!(
            "correct_answer {correct_answer} is not a valid index into {} options",
            options.len()
        )));
    }
    Ok(())
}

/// Check that a passing score is a percentage.
pub fn validate_passing_score(passing_score: i32) -> Result<(), CoreError> {
    if !(0..=100).contains(&passing_score) {
        return Err(CoreError::Validation(format!(
            "passing_score must be between 0 and 100, got {passing_score}"
        )));
    }
    Ok(())
}

/// Sum of points over active questions. Summed as `i64` so that any
/// number of `i32` point values fits.
pub fn total_points(questions: &[ScoredQuestion]) -> i64 {
    questions
        .iter()
        .filter(|q| q.is_active)
        .map(|q| i64::from(q.points))
        .sum()
}

/// Score an attempt.
///
/// `questions` are the assessment's questions in display order and
/// `answers[i]` is the option index chosen for the i-th active question.
/// Missing answers score zero. `percentage` is rounded to two decimals and
/// is `0.0` when the assessment carries no points.
pub fn score_attempt(
    questions: &[ScoredQuestion],
    answers: &[i32],
    passing_score: i32,
) -> AttemptScore {
    let active = questions.iter().filter(|q| q.is_active);
    let score: i64 = active
        .zip(answers.iter().map(Some).chain(std::iter::repeat(None)))
        .filter(|(q, answer)| *answer == Some(&q.correct_answer))
        .map(|(q, _)| i64::from(q.points))
        .sum();
    let total = total_points(questions);
    let percentage = if total > 0 {
        (score as f64 / total as f64 * 10_000.0).round() / 100.0
    } else {
        0.0
    };
    AttemptScore {
        score,
        total_points: total,
        percentage,
        passed: percentage >= f64::from(passing_score),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn q(correct_answer: i32, points: i32) -> ScoredQuestion {
        ScoredQuestion {
            correct_answer,
            points,
            is_active: true,
        }
    }

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn correct_answer_must_index_options() {
        assert!(validate_question(&options(4), 0).is_ok());
        assert!(validate_question(&options(4), 3).is_ok());
        assert_matches!(validate_question(&options(4), 4), Err(CoreError::Validation(_)));
        assert_matches!(validate_question(&options(4), -1), Err(CoreError::Validation(_)));
        assert_matches!(validate_question(&[], 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn passing_score_is_a_percentage() {
        assert!(validate_passing_score(0).is_ok());
        assert!(validate_passing_score(100).is_ok());
        assert!(validate_passing_score(101).is_err());
        assert!(validate_passing_score(-1).is_err());
    }

    #[test]
    fn total_points_ignores_inactive_questions() {
        let mut inactive = q(0, 10);
        inactive.is_active = false;
        assert_eq!(total_points(&[q(0, 2), q(1, 3), inactive]), 5);
    }

    #[test]
    fn scores_correct_answers_by_points() {
        let questions = [q(0, 1), q(2, 3), q(1, 1)];
        let result = score_attempt(&questions, &[0, 2, 0], 70);
        assert_eq!(result.score, 4);
        assert_eq!(result.total_points, 5);
        assert_eq!(result.percentage, 80.0);
        assert!(result.passed);
    }

    #[test]
    fn pass_boundary_is_inclusive() {
        let questions = [q(0, 7), q(0, 3)];
        let at = score_attempt(&questions, &[0, 1], 70);
        assert_eq!(at.percentage, 70.0);
        assert!(at.passed);

        let below = score_attempt(&questions, &[0, 1], 71);
        assert!(!below.passed);
    }

    #[test]
    fn missing_answers_score_zero() {
        let result = score_attempt(&[q(0, 1), q(0, 1), q(0, 1)], &[0], 50);
        assert_eq!(result.score, 1);
        assert_eq!(result.percentage, 33.33);
        assert!(!result.passed);
    }

    #[test]
    fn answers_skip_inactive_questions() {
        let mut inactive = q(3, 5);
        inactive.is_active = false;
        let result = score_attempt(&[q(1, 2), inactive, q(2, 2)], &[1, 2], 100);
        assert_eq!(result.score, 4);
        assert!(result.passed);
    }

    #[test]
    fn large_point_values_do_not_overflow() {
        let questions = [q(0, i32::MAX), q(0, i32::MAX), q(0, i32::MAX)];
        let result = score_attempt(&questions, &[0, 0, 1], 50);
        assert_eq!(result.total_points, 3 * i64::from(i32::MAX));
        assert_eq!(result.score, 2 * i64::from(i32::MAX));
        assert_eq!(result.percentage, 66.67);
        assert!(result.passed);
    }

    #[test]
    fn empty_assessment_scores_zero_percent() {
        let result = score_attempt(&[], &[], 0);
        assert_eq!(result.total_points, 0);
        assert_eq!(result.percentage, 0.0);
        assert!(result.passed);
    }
}
