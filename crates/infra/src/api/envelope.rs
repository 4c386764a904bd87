//! Provider response envelope
//!
//! Successful responses usually wrap their payload as `{"data": ...}`; some
//! action endpoints answer with `{"status": "success", "data": {}}`; errors
//! can arrive with a 2xx status as `{"status": "error", "message": ...}`,
//! `{"error": ...}` or `{"errors": [...]}`.

use payouts_domain::{normalize_status, ClientError};
use serde_json::Value;

/// Extract the payload of a response body.
///
/// # Errors
///
/// Returns `ClientError::Api` when the body reports an error and
/// `ClientError::InvalidResponse` when it is not JSON.
pub fn unwrap_envelope(body: &str) -> Result<String, ClientError> {
    let node: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::InvalidResponse(format!("response is not valid JSON: {e}")))?;

    if let Some(status) = node.get("status") {
        if normalize_status(status) == "error" {
            let message = field(&node, "message").or_else(|| field(&node, "error"));
            return Err(ClientError::api(None, format!("Error: {}", message.map_or_else(String::new, text))));
        }
        if node.get("data").is_some_and(is_empty_object) {
            return Ok(node.to_string());
        }
    }

    if let Some(error) = field(&node, "error") {
        return Err(ClientError::api(None, format!("Error: {}", text(error))));
    }

    if let Some(errors) = field(&node, "errors") {
        return Err(ClientError::api(None, format!("Errors: {}", join_errors(errors))));
    }

    if let Some(data) = node.get("data") {
        return Ok(data.to_string());
    }

    Ok(node.to_string())
}

/// Best-effort error message from a non-success response body.
pub fn error_message(body: &str) -> Option<String> {
    let node: Value = serde_json::from_str(body).ok()?;
    if let Some(errors) = field(&node, "errors") {
        return Some(join_errors(errors));
    }
    field(&node, "error").or_else(|| field(&node, "message")).map(text)
}

/// Member `key` of `node`, treating an explicit `null` as absent.
fn field<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|value| !value.is_null())
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(serde_json::Map::is_empty)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join_errors(errors: &Value) -> String {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                let message = item.get("error").or_else(|| item.get("message")).unwrap_or(item);
                match item.get("param") {
                    Some(param) => format!("{} {}", text(message), text(param)),
                    None => text(message),
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => text(other),
    }
}
