//! Authorization policy for courses.
//!
//! Pure functions over a [`Viewer`] and the ownership facts of a course.
//! The `can_*` functions answer yes/no for building payload flags; the
//! `authorize_*` wrappers turn a "no" into [`CoreError::Forbidden`] so
//! handlers can reject a request before any write happens.

use crate::course::CourseStatus;
use crate::error::CoreError;
use crate::types::DbId;
use crate::viewer::Viewer;

/// The facts about a course that authorization depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseAccess {
    pub instructor_id: DbId,
    pub status: CourseStatus,
}

/// Administrators and instructors may create courses.
pub fn can_create_course(viewer: &Viewer) -> bool {
    matches!(
        viewer,
        Viewer::Administrator { .. } | Viewer::Instructor { .. }
    )
}

/// Administrators may edit any course; instructors only their own.
pub fn can_edit_course(viewer: &Viewer, course: &CourseAccess) -> bool {
    match *viewer {
        Viewer::Administrator { .. } => true,
        Viewer::Instructor { id } => course.instructor_id == id,
        Viewer::Student { .. } | Viewer::Guest => false,
    }
}

/// Deletion follows the same rule as editing.
pub fn can_delete_course(viewer: &Viewer, course: &CourseAccess) -> bool {
    can_edit_course(viewer, course)
}

/// A student may enroll in a published course they are not yet enrolled in.
pub fn can_enroll(viewer: &Viewer, course: &CourseAccess, already_enrolled: bool) -> bool {
    matches!(viewer, Viewer::Student { .. }) && course.status.is_published() && !already_enrolled
}

/// Published courses are readable by anyone. Unpublished courses are
/// readable by administrators, the owning instructor, and students who
/// already hold an enrollment.
pub fn can_view_course(viewer: &Viewer, course: &CourseAccess, is_enrolled: bool) -> bool {
    if course.status.is_published() {
        return true;
    }
    match *viewer {
        Viewer::Administrator { .. } => true,
        Viewer::Instructor { id } => course.instructor_id == id,
        Viewer::Student { .. } => is_enrolled,
        Viewer::Guest => false,
    }
}

pub fn authorize_create_course(viewer: &Viewer) -> Result<(), CoreError> {
    if can_create_course(viewer) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only administrators and instructors can create courses.".into(),
        ))
    }
}

pub fn authorize_edit_course(viewer: &Viewer, course: &CourseAccess) -> Result<(), CoreError> {
    if can_edit_course(viewer, course) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can only edit your own courses.".into(),
        ))
    }
}

pub fn authorize_delete_course(viewer: &Viewer, course: &CourseAccess) -> Result<(), CoreError> {
    if can_delete_course(viewer, course) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can only delete your own courses.".into(),
        ))
    }
}
