//! Terminal output utilities.
//!
//! Formatting helpers for the `in-subnet` binary.

use crate::models::ParsedAddress;
use crate::processing::Category;
use colored::{ColoredString, Colorize};

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    format!("{quoted:>width$}")
}

/// `true` in green, `false` in red.
pub fn format_verdict(member: bool) -> ColoredString {
    if member {
        "true".green()
    } else {
        "false".red()
    }
}

/// Comma separated category names, `-` when there are none.
pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "-".to_string();
    }
    categories
        .iter()
        .map(Category::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// One `classify` output row: address, mapped flag and categories.
pub fn format_classify_row(address: &ParsedAddress, categories: &[Category]) -> String {
    let mapped = if address.is_v4_mapped() {
        "mapped"
    } else {
        ""
    };
    format!(
        "{addr},{mapped},{categories}",
        addr = format_field(address, 42),
        mapped = format_field(mapped, 8),
        categories = format_field(format_categories(categories), 28),
    )
}
