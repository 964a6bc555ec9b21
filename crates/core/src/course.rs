//! Course status and create/update form validation.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::types::Date;

/// Publication state of a course. Only `Published` courses are visible to
/// students browsing and open for enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "course_status", rename_all = "snake_case")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }

    pub fn is_published(self) -> bool {
        self == CourseStatus::Published
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CourseStatus::Draft),
            "published" => Ok(CourseStatus::Published),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(()),
        }
    }
}

/// Raw course form as submitted for both create and update.
///
/// Every field is optional so that a missing field is reported as a
/// per-field validation message. Build it from a request body with
/// [`CourseForm::validate_json`].
#[derive(Debug, Clone, Default, Validate)]
pub struct CourseForm {
    #[validate(length(
        max = 255,
        message = "Course title may not be greater than 255 characters."
    ))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[validate(range(min = 1, max = 1000, message = "Duration must be between 1 and 1000 hours."))]
    pub duration_hours: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// A course form that passed validation. Text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourse {
    pub title: String,
    pub description: String,
    pub status: CourseStatus,
    pub duration_hours: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Per-field validation failures for a [`CourseForm`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("course form is invalid: {0}")]
pub struct CourseFormErrors(pub ValidationErrors);

impl CourseFormErrors {
    /// Field name to human-readable messages, sorted by field name.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let mut out = BTreeMap::new();
        for (field, errors) in self.0.field_errors() {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            out.insert(field.to_string(), messages);
        }
        out
    }

    /// True when `field` has at least one error.
    pub fn has_field(&self, field: &str) -> bool {
        self.field_messages().contains_key(field)
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Decode one field of a submitted object. Absent and `null` are `None`;
/// a value of the wrong type is recorded against the field.
fn decode_field<T: DeserializeOwned>(
    body: &Map<String, Value>,
    field: &'static str,
    message: &'static str,
    errors: &mut Vec<(&'static str, ValidationError)>,
) -> Option<T> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                errors.push((field, field_error("type", message)));
                None
            }
        },
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl CourseForm {
    /// Decode and validate a submitted JSON object.
    ///
    /// Fields are decoded one at a time, so a value of the wrong type (a
    /// string for `duration_hours`, an unparseable date) is reported with
    /// the other field errors instead of rejecting the whole body.
    pub fn validate_json(body: &Map<String, Value>) -> Result<ValidCourse, CourseFormErrors> {
        let mut type_errors = Vec::new();
        let form = CourseForm {
            title: decode_field(body, "title", "Course title must be a string.", &mut type_errors),
            description: decode_field(
                body,
                "description",
                "Course description must be a string.",
                &mut type_errors,
            ),
            status: decode_field(body, "status", "Course status must be a string.", &mut type_errors),
            duration_hours: decode_field(
                body,
                "duration_hours",
                "Duration must be a number.",
                &mut type_errors,
            ),
            start_date: decode_field(
                body,
                "start_date",
                "Start date is not a valid date.",
                &mut type_errors,
            ),
            end_date: decode_field(
                body,
                "end_date",
                "End date is not a valid date.",
                &mut type_errors,
            ),
        };
        form.check(type_errors)
    }

    /// Validate the form, returning the cleaned values or every field error.
    ///
    /// Nothing is persisted by the caller unless this returns `Ok`.
    pub fn validate_course(&self) -> Result<ValidCourse, CourseFormErrors> {
        self.check(Vec::new())
    }

    fn check(
        &self,
        type_errors: Vec<(&'static str, ValidationError)>,
    ) -> Result<ValidCourse, CourseFormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };
        for (field, err) in type_errors {
            errors.add(field, err);
        }
        // A field that failed to decode already carries its error.
        let undecoded = |errors: &ValidationErrors, field: &str| errors.errors().contains_key(field);

        let title = non_blank(&self.title);
        if title.is_none() && !undecoded(&errors, "title") {
            errors.add("title", field_error("required", "Course title is required."));
        }

        let description = non_blank(&self.description);
        if description.is_none() && !undecoded(&errors, "description") {
            errors.add(
                "description",
                field_error("required", "Course description is required."),
            );
        }

        let status = match non_blank(&self.status) {
            None if undecoded(&errors, "status") => None,
            None => {
                errors.add("status", field_error("required", "Course status is required."));
                None
            }
            Some(s) => match s.parse::<CourseStatus>() {
                Ok(status) => Some(status),
                Err(()) => {
                    errors.add(
                        "status",
                        field_error("in", "Course status must be draft, published, or archived."),
                    );
                    None
                }
            },
        };

        if let Some(err) = check_date_order(self.start_date, self.end_date) {
            errors.add("end_date", err);
        }

        match (title, description, status) {
            (Some(title), Some(description), Some(status)) if errors.is_empty() => Ok(ValidCourse {
                title,
                description,
                status,
                duration_hours: self.duration_hours,
                start_date: self.start_date,
                end_date: self.end_date,
            }),
            _ => Err(CourseFormErrors(errors)),
        }
    }
}

/// `end_date` must not precede `start_date` when both are present.
fn check_date_order(start: Option<Date>, end: Option<Date>) -> Option<ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Some(field_error(
            "after_or_equal",
            "End date must be after start date.",
        )),
        _ => None,
    }
}
