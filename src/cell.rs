//! Coercion of raw spreadsheet cells into numbers.
//!
//! Hand-edited sheets are full of blanks, placeholder dashes and thousands
//! separators. Every input maps to a finite number; anything unreadable is 0.

/// Normalizes one text cell.
///
/// - empty, whitespace-only or a lone `-` → `0.0`
/// - thousands separators (`,`) are removed before parsing
/// - unparsable or non-finite results → `0.0`
pub fn normalize_cell(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0.0;
    }

    normalize_number(trimmed.replace(',', "").parse::<f64>().unwrap_or(0.0))
}

/// Normalizes a cell that already arrived as a number.
pub fn normalize_number(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Reads cell `column` of `row`, treating a missing cell as empty.
pub fn cell_at(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}
