//! Equivalence-testing harness for the bridgekit shims.
//!
//! This crate provides:
//! - Case execution: run every shim next to the direct underlying call and
//!   record both status codes
//! - Report generation: JSON report with a SHA-256 integrity digest over the
//!   case list
//! - Structured logging: one JSONL line per case for log aggregation

pub mod equivalence;
pub mod report;
pub mod structured_log;

use thiserror::Error;

pub use equivalence::{CaseOutcome, Phase, Suite, run_full_suite};
pub use report::EquivalenceReport;
pub use structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Harness-level failures. Shim status codes are never errors here; a
/// mismatch is a reported result, not a fault.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report digest mismatch: recorded {recorded}, computed {computed}")]
    DigestMismatch { recorded: String, computed: String },
    #[error("failed to open scratch database: status {0}")]
    ScratchDatabase(i32),
}
