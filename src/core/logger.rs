//! Main logger implementation

use super::{
    config::{Environment, LoggerConfig},
    console::Console,
    correlation::{ErrorCorrelator, IdGenerator, UuidGenerator},
    dispatcher::SinkDispatcher,
    error::Result,
    formatter::RecordFormatter,
    log_level::{LevelRegistry, LevelSelector, CUSTOM, DEBUG, ERROR, INFO, WARN},
    log_value::LogValue,
    metrics::SinkMetrics,
    sink::ErrorSink,
    timestamp::{Clock, SharedClock, SystemClock, Zone},
};
use crate::sinks::{DailyFileSink, StdoutConsole};
use colored::Color;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Leveled console logger with correlated error reporting
///
/// Every call writes to the console synchronously. Error calls additionally
/// return a correlation id and hand a copy of the record to the configured
/// sinks in the background.
///
/// # Example
///
/// ```no_run
/// use errlog::prelude::*;
///
/// let mut logger = Logger::builder().timezone("UTC").build()?;
/// logger.add_custom_level("trace", Color::Blue);
///
/// logger.info("server started");
/// logger.log("trace", ["handshake complete".into()]);
///
/// let id = logger.error_with_cause("Request failed", ErrorValue::new("IoError", "timeout"));
/// println!("reported as {}", id);
/// # Ok::<(), errlog::LoggerError>(())
/// ```
pub struct Logger {
    config: LoggerConfig,
    levels: LevelRegistry,
    formatter: RecordFormatter,
    correlator: ErrorCorrelator,
    clock: SharedClock,
    single_line_errors: bool,
    console: Mutex<Box<dyn Console>>,
    dispatcher: Option<SinkDispatcher>,
}

impl Logger {
    /// Logger with the default configuration, writing to stdout
    #[must_use]
    pub fn new() -> Self {
        let config = LoggerConfig::default();
        let clock: SharedClock = Arc::new(SystemClock);

        Self {
            levels: LevelRegistry::new(),
            formatter: RecordFormatter::new(Zone::Local, config.timestamp, Arc::clone(&clock)),
            correlator: ErrorCorrelator::new(Arc::new(UuidGenerator)),
            clock,
            single_line_errors: config.single_line_errors(),
            console: Mutex::new(Box::new(StdoutConsole::new())),
            dispatcher: None,
            config,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a logger from a configuration with the default console
    pub fn with_config(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new().config(config).build()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.levels
    }

    /// Register or replace a level; the tag shows `name` uppercased
    pub fn add_custom_level(&mut self, name: &str, color: Color) {
        self.levels.register(name, Some(color), None);
    }

    /// Register or replace a level with full control over color and glyph
    pub fn register_level(&mut self, name: &str, color: Option<Color>, glyph: Option<&str>) {
        self.levels.register(name, color, glyph);
    }

    /// Write `content` with the prefix for `level`
    ///
    /// An unknown level is not an error: the content is written without a prefix.
    pub fn log(&self, level: impl Into<LevelSelector>, content: impl IntoIterator<Item = LogValue>) {
        let selector = level.into();
        let mut args = Vec::new();
        if let Some(prefix) = self.formatter.format(&selector, &self.levels) {
            args.push(LogValue::Text(prefix.text));
        }
        args.extend(content);
        self.write_console(&args);
    }

    pub fn debug(&self, message: impl Into<LogValue>) {
        self.log(DEBUG, [message.into()]);
    }

    pub fn info(&self, message: impl Into<LogValue>) {
        self.log(INFO, [message.into()]);
    }

    pub fn warn(&self, message: impl Into<LogValue>) {
        self.log(WARN, [message.into()]);
    }

    pub fn custom(&self, message: impl Into<LogValue>) {
        self.log(CUSTOM, [message.into()]);
    }

    /// Log an error and return its freshly generated correlation id
    pub fn error(&self, content: impl Into<LogValue>) -> String {
        self.error_with(content.into(), None, None)
    }

    /// Log an error with its cause
    ///
    /// An error-kind cause is appended to the message; a plain text cause is
    /// used as the correlation id.
    pub fn error_with_cause(&self, content: impl Into<LogValue>, cause: impl Into<LogValue>) -> String {
        self.error_with(content.into(), Some(cause.into()), None)
    }

    /// Log an error under a caller-chosen correlation id
    pub fn error_with_id(&self, content: impl Into<LogValue>, id: impl Into<String>) -> String {
        self.error_with(content.into(), None, Some(id.into()))
    }

    /// Log an error and notify the sinks
    ///
    /// The console write happens before this returns; sink delivery does not.
    /// Returns the correlation id.
    pub fn error_with(
        &self,
        content: LogValue,
        cause: Option<LogValue>,
        explicit_id: Option<String>,
    ) -> String {
        let record = self
            .correlator
            .prepare(content, cause, explicit_id, self.clock.now());

        let mut args = vec![LogValue::Text(record.colored_line())];
        if !self.single_line_errors {
            if let Some(cause) = &record.cause {
                args.push(LogValue::from("\n"));
                args.push(cause.clone());
            }
        }
        self.log(ERROR, args);

        let id = record.correlation_id.clone();
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.dispatch(record);
        }
        id
    }

    /// Delivery counters, if any sink is configured
    pub fn sink_metrics(&self) -> Option<&SinkMetrics> {
        self.dispatcher.as_ref().map(SinkDispatcher::metrics)
    }

    /// Names of the configured sinks
    pub fn sink_names(&self) -> &[String] {
        self.dispatcher
            .as_ref()
            .map(SinkDispatcher::sink_names)
            .unwrap_or_default()
    }

    /// Wait for sink deliveries started so far
    ///
    /// Returns `false` if they did not finish within `timeout`.
    pub fn flush_sinks(&self, timeout: Duration) -> bool {
        self.dispatcher
            .as_ref()
            .map_or(true, |d| d.flush(timeout))
    }

    /// Gracefully stop the sink worker, waiting at most `timeout`
    ///
    /// Error calls made after shutdown still reach the console but no sink.
    /// Dropping the logger does the same with
    /// [`DEFAULT_SHUTDOWN_TIMEOUT`](super::DEFAULT_SHUTDOWN_TIMEOUT).
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.dispatcher
            .as_mut()
            .map_or(true, |d| d.shutdown(timeout))
    }

    fn write_console(&self, args: &[LogValue]) {
        let mut console = self.console.lock();
        if let Err(e) = console.write(args) {
            eprintln!("[LOGGER ERROR] Console '{}' write failed: {}", console.name(), e);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use errlog::prelude::*;
///
/// let logger = Logger::builder()
///     .timezone("Europe/Berlin")
///     .env(Environment::Development)
///     .console(BufferConsole::new())
///     .build()
///     .unwrap();
///
/// assert!(logger.sink_metrics().is_none());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Box<dyn Console>>,
    ids: Option<Arc<dyn IdGenerator>>,
    clock: Option<SharedClock>,
    sinks: Vec<Arc<dyn ErrorSink>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console: None,
            ids: None,
            clock: None,
            sinks: Vec::new(),
        }
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// IANA zone name for timestamps and daily file names
    #[must_use]
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.config.timezone = Some(name.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, show: bool) -> Self {
        self.config.timestamp = show;
        self
    }

    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.config.env = env;
        self
    }

    #[must_use]
    pub fn single_line_errors(mut self, single_line: bool) -> Self {
        self.config.single_line_errors = Some(single_line);
        self
    }

    #[must_use]
    pub fn persist_errors_to_file(mut self, persist: bool) -> Self {
        self.config.persist_errors_to_file = persist;
        self
    }

    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    /// Webhook URL notified for every error
    #[must_use]
    pub fn remote_notify_target(mut self, url: impl Into<String>) -> Self {
        self.config.remote_notify_target = Some(url.into());
        self
    }

    #[must_use]
    pub fn paste_service_url(mut self, url: impl Into<String>) -> Self {
        self.config.paste_service_url = url.into();
        self
    }

    #[must_use]
    pub fn console<C: Console + 'static>(mut self, console: C) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    #[must_use]
    pub fn id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    #[must_use]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Attach an additional error sink
    #[must_use]
    pub fn sink<S: ErrorSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Validate the configuration and start the sink worker if any sink is set
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown timezone or
    /// an unparsable webhook URL.
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        let zone = Zone::from_name(config.timezone.as_deref())?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let mut sinks: Vec<Arc<dyn ErrorSink>> = Vec::new();
        if config.persist_errors_to_file {
            sinks.push(Arc::new(DailyFileSink::new(config.log_dir.clone(), zone)));
        }
        if let Some(target) = &config.remote_notify_target {
            sinks.push(remote_sink(target, &config)?);
        }
        sinks.extend(self.sinks);

        let dispatcher = if sinks.is_empty() {
            None
        } else {
            Some(SinkDispatcher::spawn(sinks)?)
        };

        Ok(Logger {
            levels: LevelRegistry::new(),
            formatter: RecordFormatter::new(zone, config.timestamp, Arc::clone(&clock)),
            correlator: ErrorCorrelator::new(self.ids.unwrap_or_else(|| Arc::new(UuidGenerator))),
            clock,
            single_line_errors: config.single_line_errors(),
            console: Mutex::new(self.console.unwrap_or_else(|| Box::new(StdoutConsole::new()))),
            dispatcher,
            config,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "webhook")]
fn remote_sink(target: &str, config: &LoggerConfig) -> Result<Arc<dyn ErrorSink>> {
    Ok(Arc::new(crate::sinks::WebhookSink::from_config(target, config)?))
}

#[cfg(not(feature = "webhook"))]
fn remote_sink(_target: &str, _config: &LoggerConfig) -> Result<Arc<dyn ErrorSink>> {
    Err(super::error::LoggerError::config(
        "remote_notify_target",
        "built without the `webhook` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::log_level::{InlineLevel, LogOptions};
    use crate::core::log_value::ErrorValue;
    use crate::sinks::BufferConsole;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Sequence(AtomicUsize);

    impl IdGenerator for Sequence {
        fn next_id(&self) -> String {
            format!("seq-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    fn logger(builder: LoggerBuilder) -> (Logger, BufferConsole) {
        let console = BufferConsole::new();
        let logger = builder
            .console(console.clone())
            .id_generator(Sequence(AtomicUsize::new(1)))
            .build()
            .expect("valid logger");
        (logger, console)
    }

    fn first_arg(console: &BufferConsole) -> String {
        console.last().unwrap()[0].to_string()
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build().unwrap();
        assert!(logger.sink_metrics().is_none());
        assert!(logger.sink_names().is_empty());
        assert!(logger.config().timestamp);
    }

    #[test]
    fn test_builder_rejects_unknown_timezone() {
        let err = Logger::builder().timezone("Nowhere/Special").build().err().unwrap();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_leveled_calls_pass_content_separately() {
        let (logger, console) = logger(Logger::builder().timestamp(false));
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.custom("c");

        let calls = console.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], vec![LogValue::from("\x1b[36m[DEBUG]\x1b[0m"), LogValue::from("d")]);
        assert_eq!(calls[1], vec![LogValue::from("\x1b[32m✔ [INFO]\x1b[0m"), LogValue::from("i")]);
        assert_eq!(calls[2], vec![LogValue::from("\x1b[33m⚠ [WARN]\x1b[0m"), LogValue::from("w")]);
        assert_eq!(calls[3], vec![LogValue::from("\x1b[35m[CUSTOM]\x1b[0m"), LogValue::from("c")]);
    }

    #[test]
    fn test_unknown_level_has_no_prefix() {
        let (logger, console) = logger(Logger::builder());
        logger.log("nonexistent", ["a".into(), "b".into()]);
        assert_eq!(console.last().unwrap(), vec![LogValue::from("a"), LogValue::from("b")]);
    }

    #[test]
    fn test_custom_level_registration() {
        let (mut logger, console) = logger(Logger::builder().timestamp(false));
        logger.add_custom_level("trace", Color::Blue);
        logger.log("TRACE", ["t".into()]);
        assert_eq!(first_arg(&console), "\x1b[34m[TRACE]\x1b[0m");

        logger.add_custom_level("Trace", Color::White);
        logger.log("trace", ["t".into()]);
        assert_eq!(first_arg(&console), "\x1b[37m[TRACE]\x1b[0m");
        assert_eq!(logger.levels().len(), 6);
    }

    #[test]
    fn test_register_level_with_glyph() {
        let (mut logger, console) = logger(Logger::builder().timestamp(false));
        logger.register_level("audit", None, Some("§"));
        logger.log("audit", ["a".into()]);
        assert_eq!(first_arg(&console), "§ [AUDIT]");
    }

    #[test]
    fn test_inline_options() {
        let (logger, console) = logger(Logger::builder().timestamp(false));
        logger.log(
            LogOptions::new().level(InlineLevel::new("Test")).hide_level(true),
            ["Hi".into()],
        );
        assert_eq!(console.last().unwrap(), vec![LogValue::from(""), LogValue::from("Hi")]);
    }

    #[test]
    fn test_error_returns_generated_id() {
        let (logger, console) = logger(Logger::builder().timestamp(false));
        let id = logger.error("This is an error message");

        assert_eq!(id, "seq-1");
        assert_eq!(
            console.last().unwrap(),
            vec![
                LogValue::from("\x1b[31m☠ [ERROR]\x1b[0m"),
                LogValue::from("\x1b[31m[seq-1] This is an error message\x1b[0m"),
            ]
        );
    }

    #[test]
    fn test_error_with_id_and_text_cause() {
        let (logger, _console) = logger(Logger::builder());
        assert_eq!(logger.error_with_id("boom", "req-9"), "req-9");
        assert_eq!(logger.error_with_cause("boom", "trace-77"), "trace-77");
    }

    #[test]
    fn test_multi_line_errors_pass_cause() {
        let (logger, console) = logger(Logger::builder().env(Environment::Development));
        let cause = LogValue::from(ErrorValue::new("Error", "timeout"));
        logger.error_with_cause("Request failed", cause.clone());

        let call = console.last().unwrap();
        assert_eq!(call.len(), 4);
        assert_eq!(call[1], LogValue::from("\x1b[31m[seq-1] Request failed: timeout\x1b[0m"));
        assert_eq!(call[2], LogValue::from("\n"));
        assert_eq!(call[3], cause);
    }

    #[test]
    fn test_blank_text_cause_is_ignored() {
        let (logger, console) = logger(Logger::builder().env(Environment::Development));
        let id = logger.error_with_cause("boom", "");

        assert_eq!(id, "seq-1");
        let call = console.last().unwrap();
        assert_eq!(call.len(), 2);
        assert_eq!(call[1], LogValue::from("\x1b[31m[seq-1] boom\x1b[0m"));

        assert_eq!(logger.error_with_id("again", "  "), "seq-2");
    }

    #[test]
    fn test_multi_line_without_cause_stays_two_args() {
        let (logger, console) = logger(Logger::builder().single_line_errors(false));
        logger.error("lonely");
        assert_eq!(console.last().unwrap().len(), 2);
    }

    #[test]
    fn test_flush_and_shutdown_without_sinks() {
        let (mut logger, _console) = logger(Logger::builder());
        assert!(logger.flush_sinks(Duration::from_millis(10)));
        assert!(logger.shutdown(Duration::from_millis(10)));
    }
}
