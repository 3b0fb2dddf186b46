//! Correlation identifiers for error records
//!
//! Every error call produces an [`ErrorRecord`] whose identifier appears in the
//! console line, the daily file block and the webhook message, so the three can
//! be matched up later.

use super::formatter::paint;
use super::log_value::LogValue;
use chrono::{DateTime, Utc};
use colored::Color;
use std::sync::Arc;

/// Source of fresh correlation identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Everything known about one error call
///
/// Built at the start of the call and shared read-only with the sinks.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub correlation_id: String,
    /// `[id] body`, uncolored
    pub rendered_message: String,
    pub content: LogValue,
    pub cause: Option<LogValue>,
    pub occurred_at: DateTime<Utc>,
}

impl ErrorRecord {
    /// Console form of the rendered message
    #[must_use]
    pub fn colored_line(&self) -> String {
        paint(&self.rendered_message, Color::Red)
    }

    /// The value sinks report in detail: the cause if it is an error,
    /// otherwise the content.
    pub fn detail(&self) -> &LogValue {
        match &self.cause {
            Some(cause @ LogValue::Error(_)) => cause,
            _ => &self.content,
        }
    }
}

pub struct ErrorCorrelator {
    ids: Arc<dyn IdGenerator>,
}

impl ErrorCorrelator {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Derive the correlation id and rendered message for an error call.
    ///
    /// The id is `explicit_id` if given, else a plain-text `cause`, else a
    /// freshly generated one. Blank ids and blank text causes count as absent,
    /// so the id is never empty.
    pub fn prepare(
        &self,
        content: LogValue,
        cause: Option<LogValue>,
        explicit_id: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> ErrorRecord {
        let cause = cause.filter(|c| !c.as_text().is_some_and(is_blank));
        let correlation_id = explicit_id
            .filter(|id| !is_blank(id))
            .or_else(|| cause.as_ref().and_then(LogValue::as_text).map(str::to_string))
            .unwrap_or_else(|| self.ids.next_id());

        let body = match (&cause, &content) {
            (Some(LogValue::Error(err)), _) => format!("{}: {}", content, err.message()),
            (_, LogValue::Error(err)) => err.message().to_string(),
            _ => content.to_string(),
        };

        ErrorRecord {
            rendered_message: format!("[{}] {}", correlation_id, body),
            correlation_id,
            content,
            cause,
            occurred_at,
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_value::ErrorValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Sequence(AtomicUsize);

    impl IdGenerator for Sequence {
        fn next_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    fn correlator() -> ErrorCorrelator {
        ErrorCorrelator::new(Arc::new(Sequence(AtomicUsize::new(1))))
    }

    fn prepare(content: LogValue, cause: Option<LogValue>, id: Option<&str>) -> ErrorRecord {
        correlator().prepare(content, cause, id.map(str::to_string), Utc::now())
    }

    #[test]
    fn test_generated_id() {
        let c = correlator();
        let first = c.prepare("a".into(), None, None, Utc::now());
        let second = c.prepare("b".into(), None, None, Utc::now());
        assert_eq!(first.correlation_id, "id-1");
        assert_eq!(second.correlation_id, "id-2");
        assert_eq!(first.rendered_message, "[id-1] a");
    }

    #[test]
    fn test_explicit_id_wins() {
        let record = prepare("boom".into(), Some("from-cause".into()), Some("req-42"));
        assert_eq!(record.correlation_id, "req-42");
        assert_eq!(record.rendered_message, "[req-42] boom");
    }

    #[test]
    fn test_text_cause_is_id() {
        let record = prepare("boom".into(), Some("abc-123".into()), None);
        assert_eq!(record.correlation_id, "abc-123");
        assert_eq!(record.rendered_message, "[abc-123] boom");
    }

    #[test]
    fn test_blank_cause_and_id_generate_id() {
        let record = prepare("boom".into(), Some("".into()), None);
        assert_eq!(record.correlation_id, "id-1");
        assert_eq!(record.rendered_message, "[id-1] boom");
        assert!(record.cause.is_none());

        let record = prepare("boom".into(), Some("  ".into()), Some(""));
        assert_eq!(record.correlation_id, "id-1");
        assert!(record.cause.is_none());

        let record = prepare("boom".into(), Some("abc-1".into()), Some(" "));
        assert_eq!(record.correlation_id, "abc-1");
    }

    #[test]
    fn test_error_cause_appends_message() {
        let cause = LogValue::from(ErrorValue::new("Error", "timeout"));
        let record = prepare("Request failed".into(), Some(cause), None);
        assert_eq!(record.rendered_message, "[id-1] Request failed: timeout");
    }

    #[test]
    fn test_error_content_uses_message() {
        let content = LogValue::from(ErrorValue::new("ParseError", "unexpected token"));
        let record = prepare(content, None, Some("x"));
        assert_eq!(record.rendered_message, "[x] unexpected token");
    }

    #[test]
    fn test_structured_cause_generates_id() {
        let cause = LogValue::from(serde_json::json!({"code": 7}));
        let record = prepare("failed".into(), Some(cause), None);
        assert_eq!(record.correlation_id, "id-1");
        assert_eq!(record.rendered_message, "[id-1] failed");
    }

    #[test]
    fn test_colored_line_wraps_in_red() {
        let record = prepare("oops".into(), None, Some("e1"));
        assert_eq!(record.colored_line(), "\x1b[31m[e1] oops\x1b[0m");
    }

    #[test]
    fn test_detail_prefers_error_cause() {
        let cause = LogValue::from(ErrorValue::new("Error", "inner"));
        let record = prepare("outer".into(), Some(cause.clone()), None);
        assert_eq!(record.detail(), &cause);

        let record = prepare("outer".into(), Some("some-id".into()), None);
        assert_eq!(record.detail(), &LogValue::from("outer"));
    }

    #[test]
    fn test_uuid_generator_unique() {
        let ids = UuidGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
