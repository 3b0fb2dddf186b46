//! Daily error file sink
//!
//! Appends one block per error record to `{dir}/{DD-MM-YYYY}.log`, bucketing by
//! the record's date in the configured zone. Uses `tokio::fs` so the worker
//! never blocks on disk IO.

use crate::core::{ErrorRecord, ErrorSink, LoggerError, Result, Zone};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const SEPARATOR_WIDTH: usize = 50;

pub struct DailyFileSink {
    dir: PathBuf,
    zone: Zone,
    /// Serialises appends so blocks from concurrent tasks never interleave
    write_lock: Mutex<()>,
}

impl DailyFileSink {
    pub fn new(dir: impl Into<PathBuf>, zone: Zone) -> Self {
        Self {
            dir: dir.into(),
            zone,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that receives records occurring at `at`
    pub fn path_for(&self, at: &DateTime<Utc>) -> PathBuf {
        self.dir.join(format!("{}.log", self.zone.file_date(at)))
    }

    /// Text appended for one record
    pub fn render_block(&self, record: &ErrorRecord) -> String {
        format!(
            "[{}]: [{}]\n{}\n{}\n\n\n\n",
            self.zone.display(&record.occurred_at),
            record.correlation_id,
            record.detail().inspect(),
            "-".repeat(SEPARATOR_WIDTH)
        )
    }
}

#[async_trait]
impl ErrorSink for DailyFileSink {
    async fn deliver(&self, record: &ErrorRecord) -> Result<()> {
        let block = self.render_block(record);
        let path = self.path_for(&record.occurred_at);

        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("cannot create '{}'", self.dir.display()),
                e,
            )
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening daily log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        file.write_all(block.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "daily_file"
    }
}
