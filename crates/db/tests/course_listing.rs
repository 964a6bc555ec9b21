//! Role-scoped course listing: isolation, ordering, pagination.

use lms_core::course::CourseStatus;
use lms_core::pagination::COURSES_PER_PAGE;
use lms_core::roles::Role;
use lms_core::viewer::Viewer;
use lms_db::models::course::{CourseScope, CreateCourse};
use lms_db::models::user::{CreateUser, User};
use lms_db::repositories::{CourseRepo, EnrollmentRepo, UserRepo};
use sqlx::PgPool;

async fn user(pool: &PgPool, name: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
            role,
        },
    )
    .await
    .unwrap()
}

async fn course(pool: &PgPool, instructor_id: i64, title: &str, status: CourseStatus) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            instructor_id,
            title: title.to_string(),
            description: "desc".to_string(),
            status,
            duration_hours: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn test_instructor_never_sees_other_instructors_courses(pool: PgPool) {
    let alice = user(&pool, "Alice", Role::Instructor).await;
    let bob = user(&pool, "Bob", Role::Instructor).await;
    let a1 = course(&pool, alice.id, "A1", CourseStatus::Published).await;
    let a2 = course(&pool, alice.id, "A2", CourseStatus::Draft).await;
    course(&pool, bob.id, "B1", CourseStatus::Published).await;
    course(&pool, bob.id, "B2", CourseStatus::Archived).await;

    let scope = CourseScope::for_viewer(&Viewer::Instructor { id: alice.id });
    let (rows, total) = CourseRepo::list_page(&pool, scope, 1, COURSES_PER_PAGE)
        .await
        .unwrap();
    assert_eq!(total, 2);
    let mut ids: Vec<i64> = rows.iter().map(|c| c.course.id).collect();
    ids.sort();
    assert_eq!(ids, vec![a1, a2]);
    assert!(rows.iter().all(|c| c.course.instructor_id == alice.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_and_guests_see_only_published(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let student = user(&pool, "Sam", Role::Student).await;
    let published = course(&pool, instructor.id, "Open", CourseStatus::Published).await;
    course(&pool, instructor.id, "Draft", CourseStatus::Draft).await;
    course(&pool, instructor.id, "Old", CourseStatus::Archived).await;

    for viewer in [Viewer::Student { id: student.id }, Viewer::Guest] {
        let (rows, total) =
            CourseRepo::list_page(&pool, CourseScope::for_viewer(&viewer), 1, COURSES_PER_PAGE)
                .await
                .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].course.id, published);
    }

    let admin = user(&pool, "Ada", Role::Administrator).await;
    let (_, total) = CourseRepo::list_page(
        &pool,
        CourseScope::for_viewer(&Viewer::Administrator { id: admin.id }),
        1,
        COURSES_PER_PAGE,
    )
    .await
    .unwrap();
    assert_eq!(total, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_is_newest_first_with_stable_ties(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let first = course(&pool, instructor.id, "first", CourseStatus::Published).await;
    let second = course(&pool, instructor.id, "second", CourseStatus::Published).await;
    let newest = course(&pool, instructor.id, "newest", CourseStatus::Published).await;

    // Same instant for the first two, one hour later for the third.
    sqlx::query("UPDATE courses SET created_at = '2025-01-01T00:00:00Z' WHERE id IN ($1, $2)")
        .bind(first)
        .bind(second)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE courses SET created_at = '2025-01-01T01:00:00Z' WHERE id = $1")
        .bind(newest)
        .execute(&pool)
        .await
        .unwrap();

    let (rows, _) = CourseRepo::list_page(&pool, CourseScope::All, 1, COURSES_PER_PAGE)
        .await
        .unwrap();
    let ids: Vec<i64> = rows.iter().map(|c| c.course.id).collect();
    assert_eq!(ids, vec![newest, first, second]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pages_hold_ten_courses(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    for i in 0..23 {
        course(&pool, instructor.id, &format!("c{i}"), CourseStatus::Published).await;
    }

    let (page1, total) = CourseRepo::list_page(&pool, CourseScope::Published, 1, COURSES_PER_PAGE)
        .await
        .unwrap();
    assert_eq!(total, 23);
    assert_eq!(page1.len(), 10);

    let (page3, _) = CourseRepo::list_page(&pool, CourseScope::Published, 3, COURSES_PER_PAGE)
        .await
        .unwrap();
    assert_eq!(page3.len(), 3);

    let (beyond, total) = CourseRepo::list_page(&pool, CourseScope::Published, 9, COURSES_PER_PAGE)
        .await
        .unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 23);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_summary_carries_instructor_and_enrollment_count(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let s1 = user(&pool, "Sam", Role::Student).await;
    let s2 = user(&pool, "Sue", Role::Student).await;
    let id = course(&pool, instructor.id, "Popular", CourseStatus::Published).await;
    EnrollmentRepo::enroll(&pool, id, s1.id).await.unwrap();
    EnrollmentRepo::enroll(&pool, id, s2.id).await.unwrap();

    let summary = CourseRepo::find_summary(&pool, id)
        .await
        .unwrap()
        .expect("course should exist");
    assert_eq!(summary.instructor.id, instructor.id);
    assert_eq!(summary.instructor.name, "Tess");
    assert_eq!(summary.enrollments_count, 2);
}
