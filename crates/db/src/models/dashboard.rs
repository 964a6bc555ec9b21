//! Role-branched dashboard payloads.
//!
//! One struct per viewer kind, joined under [`DashboardPayload`] so the set
//! of branches is closed and matched exhaustively.

use serde::Serialize;

use crate::models::course::CourseSummary;
use crate::models::enrollment::EnrollmentDetail;

/// Site-wide counts shown to administrators.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_courses: i64,
    pub total_instructors: i64,
    pub total_students: i64,
    pub recent_courses: Vec<CourseSummary>,
    pub recent_enrollments: Vec<EnrollmentDetail>,
}

/// An instructor's own courses and students.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorDashboard {
    pub my_courses: Vec<CourseSummary>,
    /// Distinct students across all of the instructor's courses.
    pub total_students: i64,
    pub recent_enrollments: Vec<EnrollmentDetail>,
}

/// A student's enrollments and courses still open to them.
#[derive(Debug, Clone, Serialize)]
pub struct StudentDashboard {
    pub enrolled_courses: Vec<EnrollmentDetail>,
    pub available_courses: Vec<CourseSummary>,
}

/// Public counts for the welcome page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestStats {
    pub courses: i64,
    pub instructors: i64,
    pub students: i64,
}

/// Dashboard for any viewer, tagged by `role`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardPayload {
    Administrator(AdminDashboard),
    Instructor(InstructorDashboard),
    Student(StudentDashboard),
    Guest(GuestStats),
}
