//! Values passed to the console and sinks
//!
//! Content is handed through the pipeline as-is: the logger never joins
//! arguments into a single string. Each sink decides how to render a value.

use serde::Serialize;
use std::fmt;

/// Snapshot of an error-kind value
///
/// Captures the error's kind name, its message, the chain of sources and an
/// optional trace (for example a captured backtrace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorValue {
    kind: String,
    message: String,
    sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl ErrorValue {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            sources: Vec::new(),
            trace: None,
        }
    }

    /// Capture any `std::error::Error`, walking its `source()` chain.
    ///
    /// The kind is the error's type name without its module path.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut sources = Vec::new();
        let mut current = err.source();
        while let Some(source) = current {
            sources.push(source.to_string());
            current = source.source();
        }

        Self {
            kind: short_type_name(std::any::type_name::<E>()),
            message: err.to_string(),
            sources,
            trace: None,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Multi-line rendering: `kind: message`, the source chain, then the trace.
    pub fn stack(&self) -> String {
        let mut out = self.to_string();
        for source in &self.sources {
            out.push_str("\n    caused by: ");
            out.push_str(source);
        }
        if let Some(trace) = &self.trace {
            out.push('\n');
            out.push_str(trace);
        }
        out
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

fn short_type_name(full: &str) -> String {
    if full.starts_with("dyn ") {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// A single logging argument
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Text(String),
    Error(ErrorValue),
    Structured(serde_json::Value),
}

impl LogValue {
    /// Capture an error value; see [`ErrorValue::from_error`].
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        LogValue::Error(ErrorValue::from_error(err))
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            LogValue::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LogValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Full, colorless rendering with nested structures expanded at any depth.
    pub fn inspect(&self) -> String {
        match self {
            LogValue::Text(text) => text.clone(),
            LogValue::Error(err) => err.stack(),
            LogValue::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Rendering used when a value is written to a terminal
    pub fn render(&self) -> String {
        match self {
            LogValue::Text(text) => text.clone(),
            LogValue::Error(err) => err.stack(),
            LogValue::Structured(value) => value.to_string(),
        }
    }
}

/// Stringified form, as used when a value is embedded in a message body
impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Text(text) => f.write_str(text),
            LogValue::Error(err) => write!(f, "{}", err),
            LogValue::Structured(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for LogValue {
    fn from(text: &str) -> Self {
        LogValue::Text(text.to_string())
    }
}

impl From<String> for LogValue {
    fn from(text: String) -> Self {
        LogValue::Text(text)
    }
}

impl From<&String> for LogValue {
    fn from(text: &String) -> Self {
        LogValue::Text(text.clone())
    }
}

impl From<ErrorValue> for LogValue {
    fn from(err: ErrorValue) -> Self {
        LogValue::Error(err)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        LogValue::Structured(value)
    }
}

impl From<std::io::Error> for LogValue {
    fn from(err: std::io::Error) -> Self {
        LogValue::error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timeout")
        }
    }

    impl std::error::Error for Timeout {}

    #[derive(Debug)]
    struct RequestFailed(Timeout);

    impl fmt::Display for RequestFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl std::error::Error for RequestFailed {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_value_from_error() {
        let err = ErrorValue::from_error(&RequestFailed(Timeout));
        assert_eq!(err.kind(), "RequestFailed");
        assert_eq!(err.message(), "request failed");
        assert_eq!(err.sources(), ["timeout".to_string()]);
        assert_eq!(err.to_string(), "RequestFailed: request failed");
    }

    #[test]
    fn test_dyn_error_kind_falls_back() {
        let boxed: Box<dyn std::error::Error> = Box::new(Timeout);
        let err = ErrorValue::from_error(boxed.as_ref());
        assert_eq!(err.kind(), "Error");
        assert_eq!(err.message(), "timeout");
    }

    #[test]
    fn test_stack_includes_sources_and_trace() {
        let err = ErrorValue::new("IoError", "disk full")
            .with_source("write failed")
            .with_trace("at save (store.rs:10)");

        assert_eq!(
            err.stack(),
            "IoError: disk full\n    caused by: write failed\nat save (store.rs:10)"
        );
    }

    #[test]
    fn test_inspect_expands_nested_structures() {
        let value = LogValue::from(json!({
            "a": { "b": { "c": { "d": { "e": [1, 2, { "f": "deep" }] } } } }
        }));
        let rendered = value.inspect();

        assert!(rendered.contains("\"f\": \"deep\""));
        assert!(rendered.contains('\n'));
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn test_display_stringifies() {
        assert_eq!(LogValue::from("plain").to_string(), "plain");
        assert_eq!(
            LogValue::from(ErrorValue::new("Error", "boom")).to_string(),
            "Error: boom"
        );
        assert_eq!(LogValue::from(json!({"k": 1})).to_string(), "{\"k\":1}");
    }

    #[test]
    fn test_accessors() {
        let text = LogValue::from("abc");
        assert_eq!(text.as_text(), Some("abc"));
        assert!(text.as_error().is_none());

        let io = LogValue::from(std::io::Error::new(std::io::ErrorKind::Other, "io"));
        assert_eq!(io.as_error().map(ErrorValue::message), Some("io"));
        assert_eq!(io.as_error().map(ErrorValue::kind), Some("Error"));
    }
}
