//! Normalized request errors.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key in [`ResponseError::form_errors`] for errors not tied to a form field.
pub const NON_FIELD_ERROR: &str = "$internal";

/// Server-side field names that carry form-wide errors.
const NON_FIELD_KEYS: [&str; 2] = ["non_field_errors", "detail"];

/// How a request failed, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A success response whose body could not be decoded.
    #[error("Response parse error: {0}")]
    Parse(String),
}

impl FetchFailure {
    /// Creates an HTTP failure.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A failed request in the shape forms and notifications consume.
///
/// `form_errors` maps field names to one display message each; errors that
/// belong to no field live under [`NON_FIELD_ERROR`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message_for_notification}")]
pub struct ResponseError {
    /// Messages keyed by field name.
    pub form_errors: BTreeMap<String, String>,
    /// Short message suitable for a toast or banner.
    pub message_for_notification: String,
    /// HTTP status, when the server answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ResponseError {
    /// Creates an error carrying only a form-wide message.
    pub fn non_field(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            form_errors: BTreeMap::from([(NON_FIELD_ERROR.to_string(), message.clone())]),
            message_for_notification: message,
            status: None,
        }
    }

    /// Returns the message for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.form_errors.get(field).map(String::as_str)
    }

    /// Returns the form-wide message, if any.
    pub fn non_field_message(&self) -> Option<&str> {
        self.field(NON_FIELD_ERROR)
    }

    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            Some(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            None => self.message_for_notification == NETWORK_ERROR,
        }
    }
}

const NETWORK_ERROR: &str = "Network error";
const UNEXPECTED_RESPONSE: &str = "Unexpected response from server";

/// Normalize a failed request.
///
/// - Network failures become `"Network error"`.
/// - Bodies that are not a JSON object become
///   `"Unexpected response from server"`.
/// - JSON bodies are read either as `{"errors": {...}}` or as a flat object of
///   field errors. Each field's messages are joined with a space;
///   `non_field_errors` and `detail` are merged under [`NON_FIELD_ERROR`].
///
/// The notification message is the form-wide error when there is one,
/// otherwise a default for the status code.
pub fn normalize_error(failure: FetchFailure) -> ResponseError {
    match failure {
        FetchFailure::Network(reason) => {
            debug!("request failed before a response: {reason}");
            ResponseError::non_field(NETWORK_ERROR)
        }
        FetchFailure::Parse(reason) => {
            warn!("could not decode response: {reason}");
            ResponseError::non_field(UNEXPECTED_RESPONSE)
        }
        FetchFailure::Http { status, body } => normalize_http(status, &body),
    }
}

fn normalize_http(status: u16, body: &str) -> ResponseError {
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) else {
        warn!("HTTP {status} with a body that is not a JSON object");
        return ResponseError {
            status: Some(status),
            ..ResponseError::non_field(UNEXPECTED_RESPONSE)
        };
    };

    let fields = match object.get("errors") {
        Some(Value::Object(errors)) => errors,
        _ => &object,
    };
    let form_errors = collect_form_errors(fields);

    let message_for_notification = form_errors
        .get(NON_FIELD_ERROR)
        .cloned()
        .unwrap_or_else(|| status_message(status));

    debug!("HTTP {status} normalized with {} form error(s)", form_errors.len());

    ResponseError {
        form_errors,
        message_for_notification,
        status: Some(status),
    }
}

fn collect_form_errors(fields: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut form_errors: BTreeMap<String, String> = BTreeMap::new();
    for (field, value) in fields {
        let message = flatten_messages(value);
        if message.is_empty() {
            continue;
        }
        let key = if NON_FIELD_KEYS.contains(&field.as_str()) {
            NON_FIELD_ERROR
        } else {
            field.as_str()
        };
        form_errors
            .entry(key.to_string())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&message);
            })
            .or_insert(message);
    }
    form_errors
}

fn flatten_messages(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(message) => message.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_messages)
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(nested) => nested
            .values()
            .map(flatten_messages)
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Please check the form for errors".to_string(),
        401 => "Please log in to continue".to_string(),
        403 => "You do not have permission to do this".to_string(),
        404 => "The requested resource was not found".to_string(),
        429 => "Too many requests, please try again later".to_string(),
        500..=599 => "Server error, please try again later".to_string(),
        _ => format!("Request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_lists() {
        let value = serde_json::json!(["too short", ["must be unique"], null, 3]);
        assert_eq!(flatten_messages(&value), "too short must be unique 3");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(503), "Server error, please try again later");
        assert_eq!(status_message(418), "Request failed with status 418");
    }
}
