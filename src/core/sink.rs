//! Async sink trait for best-effort error delivery

use super::{correlation::ErrorRecord, error::Result};
use async_trait::async_trait;

/// Destination that receives a copy of every error record
///
/// Sinks run on the dispatcher's worker, one task per record. Returned errors
/// are reported and counted there, never propagated to the logging caller.
///
/// # Example
///
/// ```no_run
/// use errlog::core::{ErrorRecord, ErrorSink, Result};
/// use async_trait::async_trait;
///
/// struct PagerSink;
///
/// #[async_trait]
/// impl ErrorSink for PagerSink {
///     async fn deliver(&self, record: &ErrorRecord) -> Result<()> {
///         // page someone with record.correlation_id
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "pager"
///     }
/// }
/// ```
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn deliver(&self, record: &ErrorRecord) -> Result<()>;

    fn name(&self) -> &str;
}
