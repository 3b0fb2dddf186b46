//! Console and error sink implementations

pub mod console;
pub mod daily_file;
#[cfg(feature = "webhook")]
pub mod paste;
#[cfg(feature = "webhook")]
pub mod webhook;

pub use console::{BufferConsole, StdoutConsole};
pub use daily_file::DailyFileSink;
#[cfg(feature = "webhook")]
pub use paste::{PasteBody, PasteClient};
#[cfg(feature = "webhook")]
pub use webhook::{WebhookMessage, WebhookSink};

// Re-export traits for convenience
pub use crate::core::{Console, ErrorSink};
