//! HTTP-level integration tests for the home page and dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_course, create_user, get, get_auth, token_for};
use lms_core::course::CourseStatus;
use lms_core::roles::Role;
use lms_db::repositories::EnrollmentRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_home_for_guest_shows_public_counts(pool: PgPool) {
    let instructor = create_user(&pool, "Tess", Role::Instructor).await;
    create_user(&pool, "Sam", Role::Student).await;
    create_user(&pool, "Sue", Role::Student).await;
    create_course(&pool, instructor.id, "Open", CourseStatus::Published).await;
    create_course(&pool, instructor.id, "Draft", CourseStatus::Draft).await;

    let response = get(common::build_test_app(pool), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "guest");
    assert_eq!(json["data"]["courses"], 1);
    assert_eq!(json["data"]["instructors"], 1);
    assert_eq!(json["data"]["students"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_home_for_signed_in_user_is_their_dashboard(pool: PgPool) {
    let student = create_user(&pool, "Sam", Role::Student).await;

    let json = body_json(get_auth(common::build_test_app(pool), "/", &token_for(&student)).await).await;
    assert_eq!(json["data"]["role"], "student");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_requires_sign_in(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_dashboard_totals(pool: PgPool) {
    let admin = create_user(&pool, "Ada", Role::Administrator).await;
    let instructor = create_user(&pool, "Tess", Role::Instructor).await;
    let student = create_user(&pool, "Sam", Role::Student).await;
    let course = create_course(&pool, instructor.id, "Open", CourseStatus::Published).await;
    create_course(&pool, instructor.id, "Draft", CourseStatus::Draft).await;
    EnrollmentRepo::enroll(&pool, course.id, student.id).await.unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/v1/dashboard", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["role"], "administrator");
    assert_eq!(data["total_users"], 3);
    assert_eq!(data["total_courses"], 2);
    assert_eq!(data["total_instructors"], 1);
    assert_eq!(data["total_students"], 1);
    assert_eq!(data["recent_courses"].as_array().unwrap().len(), 2);
    assert_eq!(data["recent_enrollments"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_instructor_dashboard_covers_own_courses(pool: PgPool) {
    let instructor = create_user(&pool, "Tess", Role::Instructor).await;
    let other = create_user(&pool, "Otto", Role::Instructor).await;
    let student = create_user(&pool, "Sam", Role::Student).await;
    let mine = create_course(&pool, instructor.id, "Mine", CourseStatus::Published).await;
    let theirs = create_course(&pool, other.id, "Theirs", CourseStatus::Published).await;
    EnrollmentRepo::enroll(&pool, mine.id, student.id).await.unwrap();
    EnrollmentRepo::enroll(&pool, theirs.id, student.id).await.unwrap();

    let data = &body_json(
        get_auth(common::build_test_app(pool), "/api/v1/dashboard", &token_for(&instructor)).await,
    )
    .await["data"];
    assert_eq!(data["role"], "instructor");
    assert_eq!(data["my_courses"].as_array().unwrap().len(), 1);
    assert_eq!(data["my_courses"][0]["id"], mine.id);
    assert_eq!(data["total_students"], 1);
    assert_eq!(data["recent_enrollments"].as_array().unwrap().len(), 1);
}
