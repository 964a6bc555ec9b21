//! Row models and DTOs, one module per table.
//!
//! Rows derive `FromRow`; create/update inputs are plain structs built by
//! the API layer after validation.

pub mod assessment;
pub mod course;
pub mod course_material;
pub mod dashboard;
pub mod enrollment;
pub mod session;
pub mod student_assessment;
pub mod user;
