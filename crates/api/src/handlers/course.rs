//! Handlers for the `/courses` resource.
//!
//! Every handler resolves the caller to a [`Viewer`] and runs the policy
//! check before any write.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use lms_core::course::{CourseForm, CourseStatus, ValidCourse};
use lms_core::error::CoreError;
use lms_core::pagination::{clamp_page, Page, COURSES_PER_PAGE};
use lms_core::policy::{
    authorize_delete_course, authorize_edit_course, can_edit_course, can_enroll, can_view_course,
};
use lms_core::types::DbId;
use lms_core::viewer::Viewer;
use lms_db::models::assessment::AssessmentSummary;
use lms_db::models::course::{Course, CourseScope, CourseSummary, CreateCourse, UpdateCourse};
use lms_db::models::course_material::MaterialView;
use lms_db::models::enrollment::CourseEnrollment;
use lms_db::repositories::{AssessmentRepo, CourseMaterialRepo, CourseRepo, EnrollmentRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireCourseAuthor;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Statuses offered by the create and edit forms.
const STATUSES: [CourseStatus; 3] = [
    CourseStatus::Draft,
    CourseStatus::Published,
    CourseStatus::Archived,
];

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Everything the course page shows, plus what the viewer may do with it.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub course: CourseSummary,
    /// Active materials in display order.
    pub materials: Vec<MaterialView>,
    /// Active assessments with point totals.
    pub assessments: Vec<AssessmentSummary>,
    /// The viewer's own enrollment; always `None` for non-students.
    pub enrollment: Option<CourseEnrollment>,
    pub can_enroll: bool,
    pub can_edit: bool,
}

/// Context for rendering the create or edit form.
#[derive(Debug, Serialize)]
pub struct CourseFormContext {
    pub statuses: [CourseStatus; 3],
    pub default_status: CourseStatus,
    /// The course being edited; `None` on the create form.
    pub course: Option<Course>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/courses?page=
///
/// Administrators see every course, instructors their own, students and
/// guests only published ones. Newest first, ten per page.
pub async fn index(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<CourseSummary>>> {
    let page = clamp_page(params.page);
    let scope = CourseScope::for_viewer(&viewer.viewer());
    let (courses, total) =
        CourseRepo::list_page(&state.pool, scope, page, COURSES_PER_PAGE).await?;
    Ok(Json(Page::new(courses, page, COURSES_PER_PAGE, total)))
}

/// GET /api/v1/courses/create
pub async fn create_form(
    RequireCourseAuthor(_user): RequireCourseAuthor,
) -> Json<DataResponse<CourseFormContext>> {
    Json(DataResponse {
        data: CourseFormContext {
            statuses: STATUSES,
            default_status: CourseStatus::Draft,
            course: None,
        },
    })
}

/// POST /api/v1/courses
///
/// The creating user becomes the course's instructor.
pub async fn store(
    State(state): State<AppState>,
    RequireCourseAuthor(user): RequireCourseAuthor,
    body: Bytes,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<DataResponse<Course>>)> {
    let valid = parse_course_form(&body)?;
    let course =
        CourseRepo::create(&state.pool, &CreateCourse::from_valid(user.user_id, valid)).await?;

    tracing::info!(course_id = course.id, user_id = user.user_id, "Course created");

    let location = format!("/api/v1/courses/{}", course.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(DataResponse { data: course }),
    ))
}

/// GET /api/v1/courses/{id}
///
/// A course the viewer may not see is reported as missing.
pub async fn show(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let detail = load_detail(&state.pool, &viewer.viewer(), id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/courses/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseFormContext>>> {
    let course = find_course(&state.pool, id).await?;
    authorize_edit_course(&user.viewer(), &course.access())?;
    Ok(Json(DataResponse {
        data: CourseFormContext {
            statuses: STATUSES,
            default_status: CourseStatus::Draft,
            course: Some(course),
        },
    }))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = find_course(&state.pool, id).await?;
    authorize_edit_course(&user.viewer(), &course.access())?;

    let valid = parse_course_form(&body)?;
    let updated = CourseRepo::update(&state.pool, id, &UpdateCourse::from(valid))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    tracing::info!(course_id = id, user_id = user.user_id, "Course updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/courses/{id}
///
/// Materials, assessments and enrollments go with the course.
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let course = find_course(&state.pool, id).await?;
    authorize_delete_course(&user.viewer(), &course.access())?;

    if CourseRepo::delete(&state.pool, id).await? {
        tracing::info!(course_id = id, user_id = user.user_id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a course form body. The body is read raw so that callers can
/// authorize before any of it is interpreted.
fn parse_course_form(body: &[u8]) -> AppResult<ValidCourse> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {e}")))?;
    let fields = value
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".into()))?;
    Ok(CourseForm::validate_json(fields)?)
}

async fn find_course(pool: &PgPool, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
}

/// Assemble the course page for `viewer`.
pub async fn load_detail(pool: &PgPool, viewer: &Viewer, id: DbId) -> AppResult<CourseDetail> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        })
    };

    let course = CourseRepo::find_summary(pool, id)
        .await?
        .ok_or_else(not_found)?;
    let access = course.course.access();

    let enrollment = match viewer.student_id() {
        Some(student_id) => EnrollmentRepo::find(pool, id, student_id).await?,
        None => None,
    };

    if !can_view_course(viewer, &access, enrollment.is_some()) {
        return Err(not_found());
    }

    let materials = CourseMaterialRepo::list_active_for_course(pool, id)
        .await?
        .into_iter()
        .map(MaterialView::from)
        .collect();
    let assessments = AssessmentRepo::list_active_summaries_for_course(pool, id).await?;

    Ok(CourseDetail {
        can_enroll: can_enroll(viewer, &access, enrollment.is_some()),
        can_edit: can_edit_course(viewer, &access),
        course,
        materials,
        assessments,
        enrollment,
    })
}
