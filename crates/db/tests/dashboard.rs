//! Role-branched dashboard aggregation.

use assert_matches::assert_matches;
use lms_core::course::CourseStatus;
use lms_core::roles::Role;
use lms_core::viewer::Viewer;
use lms_db::models::course::CreateCourse;
use lms_db::models::dashboard::{DashboardPayload, GuestStats};
use lms_db::models::user::{CreateUser, User};
use lms_db::repositories::{CourseRepo, DashboardRepo, EnrollmentRepo, UserRepo};
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
async fn test_admin_totals_match_tables(pool: PgPool) {
    let admin = user(&pool, "Ada", Role::Administrator).await;
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let s1 = user(&pool, "Sam", Role::Student).await;
    user(&pool, "Sue", Role::Student).await;
    let mut courses = Vec::new();
    for i in 0..7 {
        courses.push(course(&pool, instructor.id, &format!("c{i}"), CourseStatus::Published).await);
    }
    for &id in &courses {
        EnrollmentRepo::enroll(&pool, id, s1.id).await.unwrap();
    }

    let dashboard = DashboardRepo::admin(&pool).await.unwrap();
    assert_eq!(dashboard.total_users, 4);
    assert_eq!(dashboard.total_courses, 7);
    assert_eq!(dashboard.total_instructors, 1);
    assert_eq!(dashboard.total_students, 2);
    assert_eq!(dashboard.recent_courses.len(), 5);
    assert_eq!(dashboard.recent_courses[0].course.id, courses[6]);
    assert_eq!(dashboard.recent_enrollments.len(), 5);
    assert_eq!(dashboard.recent_enrollments[0].student.id, s1.id);

    let payload = DashboardRepo::for_viewer(&pool, &Viewer::Administrator { id: admin.id })
        .await
        .unwrap();
    assert_matches!(payload, DashboardPayload::Administrator(_));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_instructor_courses_and_distinct_students(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let other = user(&pool, "Otto", Role::Instructor).await;
    let students: Vec<User> = create_students(&pool, 5).await;

    let two = course(&pool, instructor.id, "two", CourseStatus::Published).await;
    let five = course(&pool, instructor.id, "five", CourseStatus::Published).await;
    let zero = course(&pool, instructor.id, "zero", CourseStatus::Draft).await;
    let foreign = course(&pool, other.id, "foreign", CourseStatus::Published).await;

    for s in &students[..2] {
        EnrollmentRepo::enroll(&pool, two, s.id).await.unwrap();
    }
    for s in &students {
        EnrollmentRepo::enroll(&pool, five, s.id).await.unwrap();
        EnrollmentRepo::enroll(&pool, foreign, s.id).await.unwrap();
    }

    let dashboard = DashboardRepo::instructor(&pool, instructor.id).await.unwrap();

    let mut counts: Vec<(i64, i64)> = dashboard
        .my_courses
        .iter()
        .map(|c| (c.course.id, c.enrollments_count))
        .collect();
    counts.sort();
    let mut expected = vec![(two, 2), (five, 5), (zero, 0)];
    expected.sort();
    assert_eq!(counts, expected);

    // Students in both "two" and "five" are counted once.
    assert_eq!(dashboard.total_students, 5);

    assert_eq!(dashboard.recent_enrollments.len(), 5);
    assert!(dashboard
        .recent_enrollments
        .iter()
        .all(|e| e.course.instructor.id == instructor.id));
}

async fn create_students(pool: &PgPool, n: usize) -> Vec<User> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(user(pool, &format!("Student{i}"), Role::Student).await);
    }
    out
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_enrolled_and_available_are_disjoint(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    let student = user(&pool, "Sam", Role::Student).await;

    let x = course(&pool, instructor.id, "X", CourseStatus::Published).await;
    EnrollmentRepo::enroll(&pool, x, student.id).await.unwrap();
    course(&pool, instructor.id, "hidden", CourseStatus::Draft).await;
    for i in 0..20 {
        course(&pool, instructor.id, &format!("Y{i}"), CourseStatus::Published).await;
    }

    let dashboard = DashboardRepo::student(&pool, student.id).await.unwrap();

    assert_eq!(dashboard.enrolled_courses.len(), 1);
    assert_eq!(dashboard.enrolled_courses[0].course.id, x);
    assert_eq!(dashboard.enrolled_courses[0].course.instructor.id, instructor.id);

    assert_eq!(dashboard.available_courses.len(), 6);
    assert!(dashboard.available_courses.iter().all(|c| c.course.id != x));
    assert!(dashboard
        .available_courses
        .iter()
        .all(|c| c.course.status == CourseStatus::Published));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_guest_sees_public_counts(pool: PgPool) {
    let instructor = user(&pool, "Tess", Role::Instructor).await;
    user(&pool, "Sam", Role::Student).await;
    user(&pool, "Ada", Role::Administrator).await;
    course(&pool, instructor.id, "open", CourseStatus::Published).await;
    course(&pool, instructor.id, "draft", CourseStatus::Draft).await;

    let payload = DashboardRepo::for_viewer(&pool, &Viewer::Guest).await.unwrap();
    assert_matches!(
        payload,
        DashboardPayload::Guest(GuestStats {
            courses: 1,
            instructors: 1,
            students: 1
        })
    );
}
