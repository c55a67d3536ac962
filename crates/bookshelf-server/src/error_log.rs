//! Durable log of errors that reached the central error responder.
//!
//! Each entry is one line, `<ISO 8601 timestamp> - <description>`. The log is
//! append-only; it is never read, rotated or pruned by the server.
//!
//! Writing is fire-and-forget: [`ErrorSink::append`] never blocks and never
//! fails. [`FileErrorLog`] hands entries to a background task that performs
//! the file I/O, and a failed write is only reported through `tracing`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A single error log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl ErrorLogEntry {
    /// Create an entry stamped with the current time.
    pub fn now(description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            description: description.into(),
        }
    }

    /// Render as a newline-terminated log line.
    pub fn to_line(&self) -> String {
        format!(
            "{} - {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.description
        )
    }
}

/// Destination for error log entries.
pub trait ErrorSink: Send + Sync + 'static {
    /// Record an entry. Must not block on I/O and must not fail.
    fn append(&self, entry: ErrorLogEntry);
}

/// Appends entries to a file from a background task.
#[derive(Debug, Clone)]
pub struct FileErrorLog {
    sender: mpsc::UnboundedSender<ErrorLogEntry>,
}

impl FileErrorLog {
    /// Start the writer task for `path`.
    ///
    /// The task ends once every clone of the returned log has been dropped
    /// and the queued entries have been written; await the handle to drain.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let path = path.into();
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_entries(path, receiver));
        (Self { sender }, handle)
    }
}

impl ErrorSink for FileErrorLog {
    fn append(&self, entry: ErrorLogEntry) {
        if self.sender.send(entry).is_err() {
            tracing::error!("Error log writer has stopped; entry dropped");
        }
    }
}

async fn write_entries(path: PathBuf, mut receiver: mpsc::UnboundedReceiver<ErrorLogEntry>) {
    while let Some(entry) = receiver.recv().await {
        if let Err(e) = append_line(&path, &entry.to_line()).await {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Error writing to error log"
            );
        }
    }
    tracing::debug!(path = %path.display(), "Error log writer finished");
}

/// Open in append mode per entry so a rotated-away file is recreated.
async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

/// Keeps rendered lines in memory. Cloning shares the buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryErrorLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorSink for MemoryErrorLog {
    fn append(&self, entry: ErrorLogEntry) {
        let line = entry.to_line();
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_line_format() {
        let entry = ErrorLogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap(),
            description: "RouteNotFound: GET /nope".to_string(),
        };
        assert_eq!(
            entry.to_line(),
            "2024-03-01T12:30:05.000Z - RouteNotFound: GET /nope\n"
        );
    }

    #[test]
    fn test_memory_log_collects_lines() {
        let log = MemoryErrorLog::new();
        let shared = log.clone();
        log.append(ErrorLogEntry::now("first"));
        log.append(ErrorLogEntry::now("second"));

        let lines = shared.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - first\n"));
        assert!(lines[1].ends_with(" - second\n"));
    }

    #[tokio::test]
    async fn test_file_log_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.log");
        tokio::fs::write(&path, "existing\n").await.unwrap();

        let (log, writer) = FileErrorLog::spawn(&path);
        log.append(ErrorLogEntry::now("one"));
        log.append(ErrorLogEntry::now("two"));
        drop(log);
        writer.await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "existing");
        assert!(lines[1].ends_with(" - one"));
        assert!(lines[2].ends_with(" - two"));
    }

    #[tokio::test]
    async fn test_file_log_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let (log, writer) = FileErrorLog::spawn(dir.path());
        log.append(ErrorLogEntry::now("lost"));
        drop(log);
        writer.await.unwrap();
    }
}
