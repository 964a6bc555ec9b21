//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Accepts guests; rejects only a bad token.
//! - [`rbac::RequireCourseAuthor`] -- Requires a role that may create courses.

pub mod auth;
pub mod rbac;
