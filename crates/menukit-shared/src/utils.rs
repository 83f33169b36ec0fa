//! Utility functions

use uuid::Uuid;

pub fn is_valid_uuid(s: &str) -> bool {
    Uuid::parse_str(s).is_ok()
}

/// Normalize a human-entered code: trim, lowercase, internal whitespace
/// collapsed to single dashes.
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
