//! Structured logging contract for harness runs.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL log record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`]: validates a single JSONL line against the schema.
//! - [`validate_log_file`]: validates an entire JSONL file.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Case outcome for equivalence events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    /// Exported shim symbol the event concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Argument shape of the shim (`no_param`, `one_int`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    /// Engine option code driven by the case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shim_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            symbol: None,
            shape: None,
            verb: None,
            shim_code: None,
            direct_code: None,
            outcome: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    #[must_use]
    pub fn with_verb(mut self, verb: i32) -> Self {
        self.verb = Some(verb);
        self
    }

    #[must_use]
    pub fn with_codes(mut self, shim: i32, direct: i32) -> Self {
        self.shim_code = Some(shim);
        self.direct_code = Some(direct);
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Writes JSONL lines to a file or stdout.
pub struct LogEmitter {
    sink: Box<dyn Write>,
}

impl LogEmitter {
    /// Emitter appending to a file.
    ///
    /// # Errors
    ///
    /// File creation failure.
    pub fn file(path: &Path) -> std::io::Result<Self> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self { sink: Box::new(f) })
    }

    /// Emitter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            sink: Box::new(std::io::stdout()),
        }
    }

    /// Writes one entry as a JSONL line.
    ///
    /// # Errors
    ///
    /// Serialization or write failure.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<(), crate::HarnessError> {
        let line = serde_json::to_string(entry)?;
        writeln!(self.sink, "{line}").map_err(crate::HarnessError::Io)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a single JSONL line against the schema.
///
/// # Errors
///
/// A human-readable description of the violation.
pub fn validate_log_line(line: &str) -> Result<LogEntry, String> {
    let entry: LogEntry =
        serde_json::from_str(line).map_err(|e| format!("not a valid log entry: {e}"))?;
    if entry.timestamp.is_empty() {
        return Err("timestamp must be non-empty".to_owned());
    }
    if entry.trace_id.is_empty() {
        return Err("trace_id must be non-empty".to_owned());
    }
    if entry.event.is_empty() {
        return Err("event must be non-empty".to_owned());
    }
    Ok(entry)
}

/// Validates an entire JSONL file; blank lines are skipped.
///
/// # Errors
///
/// The first violation found, prefixed with its line number.
pub fn validate_log_file(path: &Path) -> Result<Vec<LogEntry>, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    let mut entries = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = validate_log_line(line).map_err(|e| format!("line {}: {e}", idx + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

pub(crate) fn now_utc() -> String {
    // Simple format without an external clock dependency; close enough for
    // log ordering.
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        millis,
    )
}
