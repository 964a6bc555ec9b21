//! The identity making a request.
//!
//! Every policy and aggregation call takes a [`Viewer`] explicitly; there is
//! no ambient "current user".

use crate::roles::Role;
use crate::types::DbId;

/// The authenticated (or absent) identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Guest,
    Administrator { id: DbId },
    Instructor { id: DbId },
    Student { id: DbId },
}

impl Viewer {
    /// Build a viewer for an authenticated user with the given role.
    pub fn authenticated(id: DbId, role: Role) -> Self {
        match role {
            Role::Administrator => Viewer::Administrator { id },
            Role::Instructor => Viewer::Instructor { id },
            Role::Student => Viewer::Student { id },
        }
    }

    /// The student id when the viewer is a student.
    pub fn student_id(&self) -> Option<DbId> {
        match *self {
            Viewer::Student { id } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_maps_each_role() {
        assert_eq!(
            Viewer::authenticated(1, Role::Administrator),
            Viewer::Administrator { id: 1 }
        );
        assert_eq!(
            Viewer::authenticated(2, Role::Instructor),
            Viewer::Instructor { id: 2 }
        );
        assert_eq!(
            Viewer::authenticated(3, Role::Student),
            Viewer::Student { id: 3 }
        );
    }

    #[test]
    fn student_id_only_for_students() {
        assert_eq!(Viewer::Student { id: 9 }.student_id(), Some(9));
        assert_eq!(Viewer::Guest.student_id(), None);
        assert_eq!(Viewer::Instructor { id: 9 }.student_id(), None);
    }
}
