//! Structured error payload in the spirit of RFC 7807.

use std::error::Error;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `type` used when a problem has no more specific URI.
pub const DEFAULT_PROBLEM_TYPE: &str = "about:blank";

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub field: String,
    pub message: String,
}

impl ValidationMessage {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A failed request described as data.
///
/// The trace is never part of [`ApiProblem::to_payload`] unless the caller
/// explicitly asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiProblem {
    status: u16,
    title: Option<String>,
    detail: String,
    problem_type: String,
    validation_messages: Option<Vec<ValidationMessage>>,
    trace: Option<Vec<String>>,
    additional: Map<String, Value>,
}

impl ApiProblem {
    /// Creates a problem; statuses outside `100..=599` become `500`.
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        let status = if (100..=599).contains(&status) {
            status
        } else {
            500
        };

        Self {
            status,
            title: None,
            detail: detail.into(),
            problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
            validation_messages: None,
            trace: None,
            additional: Map::new(),
        }
    }

    /// Builds a problem from an error; the `source()` chain becomes the trace.
    pub fn from_error(status: u16, error: &(dyn Error + 'static)) -> Self {
        let trace = std::iter::successors(Some(error), |e| (*e).source())
            .map(|e| format!("{e:?}"))
            .collect();

        Self::new(status, error.to_string()).with_trace(trace)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    pub fn with_validation_messages(mut self, messages: Vec<ValidationMessage>) -> Self {
        self.validation_messages = Some(messages);
        self
    }

    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Extra member rendered after the standard ones; standard keys cannot be overridden.
    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Explicit title, or the reason phrase of the status code.
    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown")
                .to_string()
        })
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn problem_type(&self) -> &str {
        &self.problem_type
    }

    pub fn validation_messages(&self) -> Option<&[ValidationMessage]> {
        self.validation_messages.as_deref()
    }

    pub fn trace(&self) -> Option<&[String]> {
        self.trace.as_deref()
    }

    /// The JSON body of the problem.
    ///
    /// `trace` is included only when `display_exceptions` is set and a trace exists.
    pub fn to_payload(&self, display_exceptions: bool) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("type".to_string(), Value::from(self.problem_type.as_str()));
        payload.insert("title".to_string(), Value::from(self.title()));
        payload.insert("status".to_string(), Value::from(self.status));
        payload.insert("detail".to_string(), Value::from(self.detail.as_str()));

        if let Some(messages) = &self.validation_messages {
            let messages = messages
                .iter()
                .map(|m| {
                    let mut entry = Map::new();
                    entry.insert("field".to_string(), Value::from(m.field.as_str()));
                    entry.insert("message".to_string(), Value::from(m.message.as_str()));
                    Value::Object(entry)
                })
                .collect();
            payload.insert("validation_messages".to_string(), Value::Array(messages));
        }

        if display_exceptions && let Some(trace) = &self.trace {
            payload.insert(
                "trace".to_string(),
                Value::Array(trace.iter().map(|t| Value::from(t.as_str())).collect()),
            );
        }

        for (key, value) in &self.additional {
            if !payload.contains_key(key) {
                payload.insert(key.clone(), value.clone());
            }
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("inner failure")]
    struct Inner;

    #[test]
    fn test_payload_shape() {
        let problem = ApiProblem::new(404, "Widget 42 not found").with_title("Not Found");
        let payload = Value::Object(problem.to_payload(false));
        assert_eq!(
            payload,
            json!({
                "type": "about:blank",
                "title": "Not Found",
                "status": 404,
                "detail": "Widget 42 not found"
            })
        );
    }

    #[test]
    fn test_title_defaults_to_reason_phrase() {
        assert_eq!(ApiProblem::new(409, "x").title(), "Conflict");
        assert_eq!(ApiProblem::new(422, "x").title(), "Unprocessable Entity");
        assert_eq!(ApiProblem::new(599, "x").title(), "Unknown");
    }

    #[test]
    fn test_invalid_status_becomes_500() {
        assert_eq!(ApiProblem::new(0, "x").status(), 500);
        assert_eq!(ApiProblem::new(1000, "x").status(), 500);
    }

    #[test]
    fn test_trace_hidden_by_default() {
        let problem = ApiProblem::new(500, "boom").with_trace(vec!["frame".to_string()]);
        assert!(!problem.to_payload(false).contains_key("trace"));
        assert_eq!(problem.to_payload(true)["trace"], json!(["frame"]));
    }

    #[test]
    fn test_from_error_collects_source_chain() {
        let error = Outer { inner: Inner };
        let problem = ApiProblem::from_error(500, &error);
        assert_eq!(problem.detail(), "outer failure");
        let trace = problem.trace().unwrap();
        assert_eq!(trace.len(), 2);
        assert!(trace[1].contains("Inner"));
    }

    #[test]
    fn test_validation_messages() {
        let problem = ApiProblem::new(400, "Invalid query")
            .with_validation_messages(vec![ValidationMessage::new("page", "must be >= 1")]);
        let payload = problem.to_payload(false);
        assert_eq!(
            payload["validation_messages"],
            json!([{ "field": "page", "message": "must be >= 1" }])
        );
    }

    #[test]
    fn test_additional_members_cannot_override_standard_ones() {
        let problem = ApiProblem::new(409, "Invalid page provided")
            .with_additional("page", 4)
            .with_additional("status", 200);
        let payload = problem.to_payload(false);
        assert_eq!(payload["page"], 4);
        assert_eq!(payload["status"], 409);
    }
}
