//! Course material types and display helpers.

use serde::{Deserialize, Serialize};

/// Kind of uploaded course material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "material_type", rename_all = "snake_case")]
pub enum MaterialType {
    Video,
    Pdf,
    Ppt,
    Document,
}

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Render a byte count as a short human-readable size (`"1.5 MB"`).
///
/// Units step by 1024 while the value is strictly greater than 1024, up to
/// GB. Values are rounded to two decimals with trailing zeros dropped.
pub fn format_file_size(bytes: i64) -> String {
    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{text} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sizes_stay_in_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1024 B");
    }

    #[test]
    fn larger_sizes_step_up_units() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 1), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 + 1), "3 GB");
    }

    #[test]
    fn gigabytes_is_the_largest_unit() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 1234567 / 1024 / 1024 = 1.1773...
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
