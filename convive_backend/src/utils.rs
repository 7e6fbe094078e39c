//! Shared helpers and constants.

use chrono::Utc;

pub const APP_NAME: &str = "convive_backend";

pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Treats an empty string the same as an absent field.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
