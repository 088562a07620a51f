//! Utility functions for name handling and display formatting.

pub mod format;

pub use format::{contains_ignore_case, format_phone, name_key, split_fields};
