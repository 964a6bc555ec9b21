//! Route definitions for the `/courses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{course, enrollment};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /            -> index
/// POST   /            -> store
/// GET    /create      -> create_form
/// POST   /enroll      -> enrollment::store
/// GET    /{id}        -> show
/// PUT    /{id}        -> update
/// DELETE /{id}        -> destroy
/// GET    /{id}/edit   -> edit_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(course::index).post(course::store))
        .route("/create", get(course::create_form))
        .route("/enroll", post(enrollment::store))
        .route(
            "/{id}",
            get(course::show)
                .put(course::update)
                .delete(course::destroy),
        )
        .route("/{id}/edit", get(course::edit_form))
}
