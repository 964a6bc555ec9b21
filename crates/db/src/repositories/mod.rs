//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assessment_question_repo;
pub mod assessment_repo;
pub mod course_material_repo;
pub mod course_repo;
pub mod dashboard_repo;
pub mod enrollment_repo;
pub mod session_repo;
pub mod student_assessment_repo;
pub mod user_repo;

pub use assessment_question_repo::AssessmentQuestionRepo;
pub use assessment_repo::AssessmentRepo;
pub use course_material_repo::CourseMaterialRepo;
pub use course_repo::CourseRepo;
pub use dashboard_repo::DashboardRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use session_repo::SessionRepo;
pub use student_assessment_repo::StudentAssessmentRepo;
pub use user_repo::UserRepo;
