//! Console trait for the synchronous output destination

use super::{error::Result, log_value::LogValue};

/// Receives every record synchronously, in call order.
///
/// `args[0]` is the formatted prefix unless the level was unknown, in which
/// case only the content values are passed.
pub trait Console: Send + Sync {
    fn write(&mut self, args: &[LogValue]) -> Result<()>;
    fn name(&self) -> &str;
}
