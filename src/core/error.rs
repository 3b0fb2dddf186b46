//! Error types for the logger system
//!
//! None of these ever reach a caller of a logging operation. They travel inside
//! the sink boundary (where the dispatcher reports and discards them) and out of
//! `LoggerBuilder::build` for invalid configuration.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP transport error
    #[cfg(feature = "webhook")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A side sink failed to deliver an error record
    #[error("Sink '{sink}' failed: {message}")]
    SinkError { sink: String, message: String },

    /// Paste service answered with something other than 200
    #[error("Paste upload rejected with status {status}")]
    PasteStatus { status: u16 },

    /// Sink worker could not be started
    #[error("Failed to start sink worker: {0}")]
    WorkerSpawn(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink delivery error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    pub fn paste_status(status: u16) -> Self {
        LoggerError::PasteStatus { status }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
