//! Repository for the `course_materials` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::course_material::{CourseMaterial, CreateCourseMaterial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, description, type, file_path, file_name, \
                       file_size, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for course materials.
pub struct CourseMaterialRepo;

impl CourseMaterialRepo {
    /// Insert a new material, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourseMaterial,
    ) -> Result<CourseMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_materials
                (course_id, title, description, type, file_path, file_name, file_size,
                 sort_order, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), COALESCE($9, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseMaterial>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.material_type)
            .bind(&input.file_path)
            .bind(&input.file_name)
            .bind(input.file_size)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Active materials of a course in display order.
    pub async fn list_active_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_materials
             WHERE course_id = $1 AND is_active = true
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, CourseMaterial>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Every material of a course, active or not, in display order.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_materials
             WHERE course_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, CourseMaterial>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }
}
