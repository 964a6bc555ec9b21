pub mod auth;
pub mod course;
pub mod dashboard;
pub mod enrollment;
