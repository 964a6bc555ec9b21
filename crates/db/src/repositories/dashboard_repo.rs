//! Role-branched dashboard aggregation.
//!
//! Read-only: every branch is a handful of counts and short lists drawn
//! from the other repositories.

use lms_core::course::CourseStatus;
use lms_core::roles::Role;
use lms_core::types::DbId;
use lms_core::viewer::Viewer;
use sqlx::PgPool;

use crate::models::dashboard::{
    AdminDashboard, DashboardPayload, GuestStats, InstructorDashboard, StudentDashboard,
};
use crate::repositories::{CourseRepo, EnrollmentRepo, UserRepo};

/// Length of the "recent" lists on admin and instructor dashboards.
pub const RECENT_LIMIT: i64 = 5;

/// Length of the "available courses" list on the student dashboard.
pub const AVAILABLE_LIMIT: i64 = 6;

/// Builds dashboards for each kind of viewer.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Dashboard for `viewer`, dispatched on its role.
    pub async fn for_viewer(pool: &PgPool, viewer: &Viewer) -> Result<DashboardPayload, sqlx::Error> {
        let payload = match *viewer {
            Viewer::Administrator { .. } => DashboardPayload::Administrator(Self::admin(pool).await?),
            Viewer::Instructor { id } => {
                DashboardPayload::Instructor(Self::instructor(pool, id).await?)
            }
            Viewer::Student { id } => DashboardPayload::Student(Self::student(pool, id).await?),
            Viewer::Guest => DashboardPayload::Guest(Self::guest_stats(pool).await?),
        };
        Ok(payload)
    }

    /// Site-wide totals plus the most recent courses and enrollments.
    pub async fn admin(pool: &PgPool) -> Result<AdminDashboard, sqlx::Error> {
        Ok(AdminDashboard {
            total_users: UserRepo::count(pool).await?,
            total_courses: CourseRepo::count(pool).await?,
            total_instructors: UserRepo::count_by_role(pool, Role::Instructor).await?,
            total_students: UserRepo::count_by_role(pool, Role::Student).await?,
            recent_courses: CourseRepo::list_recent(pool, RECENT_LIMIT).await?,
            recent_enrollments: EnrollmentRepo::list_recent(pool, RECENT_LIMIT).await?,
        })
    }

    /// The instructor's courses, distinct student count, and recent
    /// enrollments in their courses.
    pub async fn instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<InstructorDashboard, sqlx::Error> {
        Ok(InstructorDashboard {
            my_courses: CourseRepo::list_by_instructor(pool, instructor_id).await?,
            total_students: EnrollmentRepo::count_students_for_instructor(pool, instructor_id)
                .await?,
            recent_enrollments: EnrollmentRepo::list_recent_for_instructor(
                pool,
                instructor_id,
                RECENT_LIMIT,
            )
            .await?,
        })
    }

    /// The student's enrollments and published courses they have not joined.
    pub async fn student(pool: &PgPool, student_id: DbId) -> Result<StudentDashboard, sqlx::Error> {
        Ok(StudentDashboard {
            enrolled_courses: EnrollmentRepo::list_for_student(pool, student_id).await?,
            available_courses: CourseRepo::list_available_for_student(
                pool,
                student_id,
                AVAILABLE_LIMIT,
            )
            .await?,
        })
    }

    /// Public counts: published courses, instructors and students.
    pub async fn guest_stats(pool: &PgPool) -> Result<GuestStats, sqlx::Error> {
        Ok(GuestStats {
            courses: CourseRepo::count_by_status(pool, CourseStatus::Published).await?,
            instructors: UserRepo::count_by_role(pool, Role::Instructor).await?,
            students: UserRepo::count_by_role(pool, Role::Student).await?,
        })
    }
}
