//! Human-readable messages for failed backend calls.

use serde_json::Value;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";
pub const CONNECTION_ERROR: &str =
    "Could not connect to the server. Please check your internet connection.";

/// Builds the message shown for an HTTP error response.
///
/// The body is inspected for `error.message`, an `errors` list, a `message`
/// field, or a bare string, in that order; the status class is prefixed.
pub fn format_api_error(status: u16, body: &str) -> String {
    let detail = match serde_json::from_str::<Value>(body) {
        Ok(value) => detail_from_body(&value),
        Err(_) if !body.trim().is_empty() => Some(body.trim().to_string()),
        Err(_) => None,
    };
    let message = detail.unwrap_or_else(|| UNEXPECTED_ERROR.to_string());

    match status {
        400 => format!("Invalid data: {message}"),
        404 => format!("Not found: {message}"),
        500 => format!("Server error: {message}"),
        _ => message,
    }
}

/// Message for a request that never produced a response.
pub fn format_transport_error(reason: &str) -> String {
    if reason.is_empty() {
        CONNECTION_ERROR.to_string()
    } else {
        format!("{CONNECTION_ERROR} ({reason})")
    }
}

fn detail_from_body(body: &Value) -> Option<String> {
    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(format!("Error: {message}"));
    }
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let joined = errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        return Some(format!("Validation error: {joined}"));
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(format!("Server error: {message}"));
    }
    body.as_str().map(str::to_string)
}
