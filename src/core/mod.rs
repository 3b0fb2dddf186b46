//! Core logger types and traits

pub mod config;
pub mod console;
pub mod correlation;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_value;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config::{Environment, LoggerConfig};
pub use console::Console;
pub use correlation::{ErrorCorrelator, ErrorRecord, IdGenerator, UuidGenerator};
pub use dispatcher::{SinkDispatcher, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{LoggerError, Result};
pub use formatter::{paint, Prefix, RecordFormatter};
pub use log_level::{InlineLevel, LevelDescriptor, LevelRegistry, LevelSelector, LogOptions};
pub use log_value::{ErrorValue, LogValue};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::SinkMetrics;
pub use sink::ErrorSink;
pub use timestamp::{Clock, FixedClock, SystemClock, Zone};
