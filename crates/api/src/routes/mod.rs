pub mod auth;
pub mod course;
pub mod dashboard;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (requires auth)
/// /auth/me                     current user (requires auth)
///
/// /dashboard                   role-branched dashboard (requires auth)
///
/// /courses                     list (any), create (admin or instructor)
/// /courses/create              create form context
/// /courses/enroll              enroll (requires auth)
/// /courses/{id}                show (any), update, delete (admin or owner)
/// /courses/{id}/edit           edit form context
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/dashboard", get(handlers::dashboard::show))
        .nest("/courses", course::router())
}
