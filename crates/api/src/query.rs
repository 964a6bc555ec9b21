//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination (`?page=`). Missing or non-positive values are
/// treated as page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}
