//! Output formatting for the command line.
//!
//! - [`terminal`] - Field, verdict and category formatting

mod terminal;

pub use terminal::{format_categories, format_classify_row, format_field, format_verdict};
