//! Report generation.
//!
//! A report is the serialized case list plus summary counts and a SHA-256
//! digest over the canonical JSON of the cases, so downstream tooling can
//! detect a hand-edited report.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::HarnessError;
use crate::equivalence::{CaseOutcome, Suite};
use crate::structured_log::now_utc;

/// Machine-readable equivalence report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalenceReport {
    pub generated_utc: String,
    pub total: usize,
    pub mismatched: usize,
    pub sha256: String,
    pub cases: Vec<CaseOutcome>,
}

fn digest_cases(cases: &[CaseOutcome]) -> Result<String, HarnessError> {
    let canonical = serde_json::to_vec(cases)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}

impl EquivalenceReport {
    /// Builds a report from a completed suite.
    ///
    /// # Errors
    ///
    /// Serialization failure while computing the digest.
    pub fn from_suite(suite: Suite) -> Result<Self, HarnessError> {
        let sha256 = digest_cases(&suite.cases)?;
        Ok(Self {
            generated_utc: now_utc(),
            total: suite.cases.len(),
            mismatched: suite.mismatches(),
            sha256,
            cases: suite.cases,
        })
    }

    /// Writes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn write_json(&self, path: &Path) -> Result<(), HarnessError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a report from disk.
    ///
    /// # Errors
    ///
    /// I/O or deserialization failure.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Checks the recorded digest and summary counts against the case list.
    ///
    /// # Errors
    ///
    /// [`HarnessError::DigestMismatch`] when the report was altered.
    pub fn verify(&self) -> Result<(), HarnessError> {
        let computed = digest_cases(&self.cases)?;
        if computed != self.sha256 {
            return Err(HarnessError::DigestMismatch {
                recorded: self.sha256.clone(),
                computed,
            });
        }
        let mismatched = self.cases.iter().filter(|c| !c.matched).count();
        if self.total != self.cases.len() || self.mismatched != mismatched {
            return Err(HarnessError::DigestMismatch {
                recorded: format!("total={} mismatched={}", self.total, self.mismatched),
                computed: format!("total={} mismatched={}", self.cases.len(), mismatched),
            });
        }
        Ok(())
    }
}
