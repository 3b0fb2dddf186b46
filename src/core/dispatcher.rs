//! Fire-and-forget fan-out of error records to side sinks
//!
//! A dedicated worker thread runs a single-threaded tokio runtime. Each
//! dispatched record becomes one task per sink; every task is isolated so a
//! failing or panicking sink affects neither the caller nor the other sinks.

use super::{
    correlation::ErrorRecord,
    error::{LoggerError, Result},
    metrics::SinkMetrics,
    sink::ErrorSink,
};
use std::any::Any;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

/// Default timeout for draining sink tasks when the dispatcher is dropped
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

enum Command {
    Deliver(Arc<ErrorRecord>),
    /// Acknowledged once every task spawned so far has finished
    Flush(crossbeam_channel::Sender<()>),
}

pub struct SinkDispatcher {
    sender: Option<mpsc::UnboundedSender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<SinkMetrics>,
    sink_names: Vec<String>,
}

impl SinkDispatcher {
    /// Start the worker thread for the given sinks
    pub fn spawn(sinks: Vec<Arc<dyn ErrorSink>>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                LoggerError::io_operation("starting sink runtime", "cannot build tokio runtime", e)
            })?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let metrics = Arc::new(SinkMetrics::new());
        let worker_metrics = Arc::clone(&metrics);
        let sink_names = sinks.iter().map(|s| s.name().to_string()).collect();

        let worker = thread::Builder::new()
            .name("errlog-sinks".to_string())
            .spawn(move || runtime.block_on(run_worker(receiver, sinks, worker_metrics)))
            .map_err(|e| LoggerError::WorkerSpawn(e.to_string()))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            metrics,
            sink_names,
        })
    }

    /// Hand a record to every sink without waiting for delivery
    pub fn dispatch(&self, record: ErrorRecord) {
        self.metrics.record_dispatched();
        let delivered = self
            .sender
            .as_ref()
            .is_some_and(|s| s.send(Command::Deliver(Arc::new(record))).is_ok());

        if !delivered {
            eprintln!("[LOGGER WARNING] Sink worker is not running, error record not delivered");
        }
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    pub fn sink_names(&self) -> &[String] {
        &self.sink_names
    }

    /// Wait until every sink task dispatched so far has finished
    ///
    /// Returns `false` if the worker did not catch up within `timeout`.
    pub fn flush(&self, timeout: Duration) -> bool {
        let Some(sender) = self.sender.as_ref() else {
            return true;
        };

        let (ack, done) = crossbeam_channel::bounded(1);
        if sender.send(Command::Flush(ack)).is_err() {
            return false;
        }
        done.recv_timeout(timeout).is_ok()
    }

    /// Stop accepting records and wait for in-flight sink tasks
    ///
    /// # Returns
    ///
    /// `true` if the worker drained within `timeout`, `false` otherwise
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker drain and exit
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Sink worker thread panicked during shutdown: {}",
                        panic_message(e)
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Sink worker did not finish within {:?}. \
                     Some error records may not have been delivered.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for SinkDispatcher {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<Command>,
    sinks: Vec<Arc<dyn ErrorSink>>,
    metrics: Arc<SinkMetrics>,
) {
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(Command::Deliver(record)) => {
                    for sink in &sinks {
                        let sink = Arc::clone(sink);
                        let record = Arc::clone(&record);
                        let metrics = Arc::clone(&metrics);
                        tasks.spawn(async move {
                            deliver(sink.as_ref(), &record, &metrics).await;
                        });
                    }
                }
                Some(Command::Flush(ack)) => {
                    drain(&mut tasks, &metrics).await;
                    let _ = ack.send(());
                }
                None => break,
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                reap(joined, &metrics);
            }
        }
    }

    drain(&mut tasks, &metrics).await;
}

async fn deliver(sink: &dyn ErrorSink, record: &ErrorRecord, metrics: &SinkMetrics) {
    match sink.deliver(record).await {
        Ok(()) => {
            metrics.record_delivered();
        }
        Err(e) => {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' failed for error {}: {}",
                sink.name(),
                record.correlation_id,
                e
            );
            metrics.record_failed();
        }
    }
}

async fn drain(tasks: &mut JoinSet<()>, metrics: &SinkMetrics) {
    while let Some(joined) = tasks.join_next().await {
        reap(joined, metrics);
    }
}

fn reap(joined: std::result::Result<(), JoinError>, metrics: &SinkMetrics) {
    let Err(e) = joined else {
        return;
    };
    if e.is_panic() {
        eprintln!(
            "[LOGGER CRITICAL] Sink task panicked: {}. Other sinks continue to function.",
            panic_message(e.into_panic())
        );
        metrics.record_panicked();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
