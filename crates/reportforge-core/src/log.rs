//! User-visible log list.
//!
//! Distinct from `tracing` output: entries here are shown to the user in
//! the designer's log panel. Load failures and degraded no-op operations
//! land here in addition to being traced.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single entry in the user-visible log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    /// Short one-line summary.
    pub message: String,
    /// Full detail text, e.g. the error chain.
    pub description: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Append-only list of [`LogEntry`] values
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Append an error entry with the full error chain as description
    pub fn error(&mut self, message: impl Into<String>, err: &dyn std::error::Error) {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            description.push_str("\nCaused by: ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        self.push(LogEntry::new(LogLevel::Error, message, description));
    }

    /// Append a warning entry
    pub fn warning(&mut self, message: impl Into<String>, description: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Warning, message, description));
    }

    /// Append an informational entry
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(LogLevel::Info, message, String::new()));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent entry
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at or above the given severity
    pub fn at_least(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        let rank = |l: LogLevel| match l {
            LogLevel::Info => 0,
            LogLevel::Warning => 1,
            LogLevel::Error => 2,
        };
        let min = rank(level);
        self.entries.iter().filter(move |e| rank(e.level) >= min)
    }
}
