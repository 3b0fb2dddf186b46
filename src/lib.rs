//! # errlog
//!
//! Colorized console logger with correlated error reporting.
//!
//! ## Features
//!
//! - **Leveled output**: built-in and runtime-registered levels with colors and glyphs
//! - **Correlation ids**: every error call returns an id that also appears in
//!   the console line, the daily error file and the webhook notification
//! - **Best-effort sinks**: file and webhook delivery run in the background and
//!   never fail the caller
//!
//! ```
//! use errlog::prelude::*;
//!
//! let console = BufferConsole::new();
//! let logger = Logger::builder()
//!     .timestamp(false)
//!     .console(console.clone())
//!     .build()
//!     .unwrap();
//!
//! let id = logger.error_with_id("payment declined", "order-17");
//! assert_eq!(id, "order-17");
//! assert_eq!(console.len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Clock, Console, Environment, ErrorRecord, ErrorSink, ErrorValue, FixedClock, IdGenerator,
        InlineLevel, LevelDescriptor, LevelRegistry, LevelSelector, LogOptions, LogValue, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, Result, SinkMetrics, Zone,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{BufferConsole, DailyFileSink, StdoutConsole};
    pub use colored::Color;
}

pub use crate::core::{
    Clock, Console, Environment, ErrorRecord, ErrorSink, ErrorValue, FixedClock, IdGenerator,
    InlineLevel, LevelDescriptor, LevelRegistry, LevelSelector, LogOptions, LogValue, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, Result, SinkMetrics, Zone, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::{BufferConsole, DailyFileSink, StdoutConsole};
