//! Course entity model and DTOs.

use lms_core::course::{CourseStatus, ValidCourse};
use lms_core::policy::CourseAccess;
use lms_core::types::{Date, DbId, Timestamp};
use lms_core::viewer::Viewer;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub instructor_id: DbId,
    pub status: CourseStatus,
    pub duration_hours: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// The ownership facts the authorization policy works on.
    pub fn access(&self) -> CourseAccess {
        CourseAccess {
            instructor_id: self.instructor_id,
            status: self.status,
        }
    }
}

/// Flat row for course listings joined with the instructor and an
/// enrollment count. Converted into [`CourseSummary`] for output.
#[derive(Debug, Clone, FromRow)]
pub struct CourseSummaryRow {
    #[sqlx(flatten)]
    pub course: Course,
    pub instructor_name: String,
    pub instructor_email: String,
    pub enrollments_count: i64,
}

/// A course annotated with its instructor and enrollment count.
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: UserSummary,
    pub enrollments_count: i64,
}

impl From<CourseSummaryRow> for CourseSummary {
    fn from(row: CourseSummaryRow) -> Self {
        let instructor = UserSummary {
            id: row.course.instructor_id,
            name: row.instructor_name,
            email: row.instructor_email,
        };
        Self {
            course: row.course,
            instructor,
            enrollments_count: row.enrollments_count,
        }
    }
}

/// Which courses a listing may include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseScope {
    /// Every course regardless of status.
    All,
    /// Courses taught by one instructor, any status.
    OwnedBy(DbId),
    /// Published courses only.
    Published,
}

impl CourseScope {
    /// Administrators see everything, instructors their own courses, and
    /// students and guests only published courses.
    pub fn for_viewer(viewer: &Viewer) -> Self {
        match *viewer {
            Viewer::Administrator { .. } => CourseScope::All,
            Viewer::Instructor { id } => CourseScope::OwnedBy(id),
            Viewer::Student { .. } | Viewer::Guest => CourseScope::Published,
        }
    }
}

/// DTO for creating a course. `instructor_id` is always the creating user.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub instructor_id: DbId,
    pub title: String,
    pub description: String,
    pub status: CourseStatus,
    pub duration_hours: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl CreateCourse {
    pub fn from_valid(instructor_id: DbId, course: ValidCourse) -> Self {
        Self {
            instructor_id,
            title: course.title,
            description: course.description,
            status: course.status,
            duration_hours: course.duration_hours,
            start_date: course.start_date,
            end_date: course.end_date,
        }
    }
}

/// DTO for updating a course. The form is a full replacement of the
/// editable fields; ownership never changes.
#[derive(Debug, Clone)]
pub struct UpdateCourse {
    pub title: String,
    pub description: String,
    pub status: CourseStatus,
    pub duration_hours: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl From<ValidCourse> for UpdateCourse {
    fn from(course: ValidCourse) -> Self {
        Self {
            title: course.title,
            description: course.description,
            status: course.status,
            duration_hours: course.duration_hours,
            start_date: course.start_date,
            end_date: course.end_date,
        }
    }
}
