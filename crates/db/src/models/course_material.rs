//! Course material model and DTOs.

use lms_core::material::{format_file_size, MaterialType};
use lms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `course_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseMaterial {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub file_path: String,
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A material as shown on the course page, with a readable file size.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialView {
    #[serde(flatten)]
    pub material: CourseMaterial,
    pub formatted_file_size: String,
}

impl From<CourseMaterial> for MaterialView {
    fn from(material: CourseMaterial) -> Self {
        let formatted_file_size = format_file_size(material.file_size);
        Self {
            material,
            formatted_file_size,
        }
    }
}

/// DTO for attaching a stored file to a course.
#[derive(Debug, Clone)]
pub struct CreateCourseMaterial {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub material_type: MaterialType,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}
