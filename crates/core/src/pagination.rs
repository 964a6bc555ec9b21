//! Page-number pagination for course listings.

use serde::Serialize;

/// Courses per listing page.
pub const COURSES_PER_PAGE: i64 = 10;

/// Normalize a 1-based page number. Missing or non-positive pages become 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.filter(|p| *p >= 1).unwrap_or(1)
}

/// Row offset for a 1-based page.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (clamp_page(Some(page)) - 1).saturating_mul(per_page)
}

/// Number of the last page; at least 1 even when there are no rows.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page
}

/// One page of results plus the numbers a client needs to page through.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            data,
            current_page: clamp_page(Some(page)),
            per_page,
            total,
            last_page: last_page(total, per_page),
        }
    }
}
