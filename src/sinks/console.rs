//! Console implementations

use crate::core::{Console, LogValue, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Writes each record as one line on stdout, arguments separated by a space
pub struct StdoutConsole {
    use_colors: bool,
}

impl StdoutConsole {
    /// Create a stdout console with colors enabled
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// With colors disabled, ANSI sequences are stripped before writing
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn render(&self, args: &[LogValue]) -> String {
        let line = args
            .iter()
            .map(LogValue::render)
            .collect::<Vec<_>>()
            .join(" ");
        if self.use_colors {
            line
        } else {
            ::console::strip_ansi_codes(&line).into_owned()
        }
    }
}

impl Default for StdoutConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdoutConsole {
    fn write(&mut self, args: &[LogValue]) -> Result<()> {
        let line = self.render(args);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// In-memory console recording every call's arguments
///
/// Clones share the same buffer, so one handle can be given to the logger and
/// another kept for inspection.
///
/// # Example
///
/// ```
/// use errlog::prelude::*;
///
/// let console = BufferConsole::new();
/// let logger = Logger::builder()
///     .console(console.clone())
///     .timestamp(false)
///     .build()
///     .unwrap();
///
/// logger.info("ready");
/// let call = console.last().unwrap();
/// assert_eq!(call[1], LogValue::from("ready"));
/// ```
#[derive(Clone, Default)]
pub struct BufferConsole {
    calls: Arc<Mutex<Vec<Vec<LogValue>>>>,
}

impl BufferConsole {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of every recorded call, oldest first
    pub fn calls(&self) -> Vec<Vec<LogValue>> {
        self.calls.lock().clone()
    }

    /// Get the most recent call's arguments
    pub fn last(&self) -> Option<Vec<LogValue>> {
        self.calls.lock().last().cloned()
    }

    /// Get the number of recorded calls
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Drop all recorded calls
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Console for BufferConsole {
    fn write(&mut self, args: &[LogValue]) -> Result<()> {
        self.calls.lock().push(args.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorValue;

    #[test]
    fn test_render_joins_arguments() {
        let console = StdoutConsole::new();
        let line = console.render(&[
            LogValue::from("\x1b[32m[INFO]\x1b[0m"),
            LogValue::from("ready"),
            LogValue::from(serde_json::json!({"port": 8080})),
        ]);
        assert_eq!(line, "\x1b[32m[INFO]\x1b[0m ready {\"port\":8080}");
    }

    #[test]
    fn test_render_without_colors() {
        let console = StdoutConsole::with_colors(false);
        let line = console.render(&[LogValue::from("\x1b[31m[x] boom\x1b[0m")]);
        assert_eq!(line, "[x] boom");
    }

    #[test]
    fn test_render_error_as_stack() {
        let console = StdoutConsole::new();
        let err = ErrorValue::new("Error", "timeout").with_source("socket closed");
        let line = console.render(&[LogValue::from("\n"), LogValue::from(err)]);
        assert_eq!(line, "\n Error: timeout\n    caused by: socket closed");
    }

    #[test]
    fn test_render_without_colors_keeps_glyphs() {
        let console = StdoutConsole::with_colors(false);
        let line = console.render(&[
            LogValue::from("\x1b[90m[ts]\x1b[0m \x1b[32m✔ [INFO]\x1b[0m"),
            LogValue::from("plain ✔"),
        ]);
        assert_eq!(line, "[ts] ✔ [INFO] plain ✔");
    }

    #[test]
    fn test_buffer_console_shares_calls() {
        let console = BufferConsole::new();
        let mut handle = console.clone();
        handle.write(&[LogValue::from("a")]).unwrap();
        handle.write(&[LogValue::from("b"), LogValue::from("c")]).unwrap();

        assert_eq!(console.len(), 2);
        assert_eq!(console.last().unwrap().len(), 2);
        console.clear();
        assert!(console.is_empty());
    }

    #[test]
    fn test_stdout_console_write() {
        let mut console = StdoutConsole::new();
        assert!(console.write(&[LogValue::from("stdout console test")]).is_ok());
        assert_eq!(console.name(), "stdout");
    }
}
