//! Action status detection
//!
//! Delete and notification calls answer with a JSON object whose `status`
//! field says whether the action went through. Upstream formatting is loose:
//! the value may be a plain string, a string that still carries its own
//! quotes, or differ in case.

use serde_json::Value;

const SUCCESS: &str = "success";

/// Lowercased text of a status value with every double quote removed.
pub fn normalize_status(status: &Value) -> String {
    let raw = match status {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    raw.replace('"', "").to_lowercase()
}

/// Returns true iff `status` reads as `"success"`, ignoring case and quotes.
pub fn is_success_status(status: &Value) -> bool {
    normalize_status(status) == SUCCESS
}
