//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use errlog::prelude::*;
//! use errlog::{error, info};
//!
//! let logger = Logger::builder().console(BufferConsole::new()).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Error macros return the correlation id
//! let id = error!(logger, "Upstream {} unreachable", "billing");
//! assert!(!id.is_empty());
//! ```

/// Log a formatted message at any level.
///
/// The level is anything convertible into a `LevelSelector`: a registry key or
/// inline `LogOptions`.
///
/// # Examples
///
/// ```
/// # use errlog::prelude::*;
/// # let logger = Logger::builder().console(BufferConsole::new()).build().unwrap();
/// use errlog::log;
/// log!(logger, "custom", "Simple message");
/// log!(logger, LogOptions::new().timestamp(false), "Queue depth: {}", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, [$crate::LogValue::from(format!($($arg)+))])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use errlog::prelude::*;
/// # let logger = Logger::builder().console(BufferConsole::new()).build().unwrap();
/// use errlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an error-level message and evaluate to its correlation id.
///
/// # Examples
///
/// ```
/// # use errlog::prelude::*;
/// # let logger = Logger::builder().console(BufferConsole::new()).build().unwrap();
/// use errlog::error;
/// let id = error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// assert!(!id.is_empty());
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}
