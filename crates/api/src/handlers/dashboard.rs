//! Handlers for the home page and the role-branched dashboard.

use axum::extract::State;
use axum::Json;
use lms_db::models::dashboard::DashboardPayload;
use lms_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /
///
/// Guests get the public welcome counts; signed-in users their dashboard.
pub async fn home(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
) -> AppResult<Json<DataResponse<DashboardPayload>>> {
    let payload = DashboardRepo::for_viewer(&state.pool, &viewer.viewer()).await?;
    Ok(Json(DataResponse { data: payload }))
}

/// GET /api/v1/dashboard
pub async fn show(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardPayload>>> {
    let payload = DashboardRepo::for_viewer(&state.pool, &user.viewer()).await?;
    Ok(Json(DataResponse { data: payload }))
}
