//! Signer-policy verification.
//!
//! An entry passes when it carries at least one signer and every required signer
//! is among them. Extra signers are fine. An unsigned entry never passes, even
//! against an empty required set. A file passes when it produced at least one
//! entry and all of its entries pass; a run passes when every file passes.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::RequiredSigners;
use crate::container::read_cod;
use crate::diagnostics::Diagnostics;
use crate::error::PolicyError;
use crate::model::ParseOutcome;

/// Why an entry passed or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    /// Parsed cleanly but carries no signature blocks.
    Unsigned,
    MissingSigners { missing: Vec<String> },
    /// Not a COD, or a header version that is too old.
    BadFormat { reason: String },
    /// Malformed or short stream; no usable signer data.
    Truncated { reason: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub signers: Vec<String>,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl EntryReport {
    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub passed: bool,
    pub entries: Vec<EntryReport>,
    /// Set when the file could not be opened or dispatched at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn new(path: &Path, entries: Vec<EntryReport>, error: Option<String>) -> Self {
        let passed = error.is_none() && !entries.is_empty() && entries.iter().all(|e| e.passed());
        Self { path: path.to_path_buf(), passed, entries, error }
    }

    /// Entries that failed the policy.
    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.passed())
    }
}

/// Verdicts and the full audit trail of one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub diagnostics: Diagnostics,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.files.iter().all(|f| f.passed)
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.passed)
    }

    /// Turn the run into the single aggregate failure signal.
    pub fn ensure_passed(&self) -> Result<(), PolicyError> {
        if self.passed() {
            return Ok(());
        }
        let failed = self.failed_files().map(|f| f.path.clone()).collect();
        Err(PolicyError::NotAllSigned { failed })
    }
}

/// Checks COD files against a fixed set of required signers.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    required: RequiredSigners,
}

impl SignatureVerifier {
    pub fn new(required: RequiredSigners) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &RequiredSigners {
        &self.required
    }

    /// Check every path in order. Each file is parsed to completion before the next.
    pub fn run<I, P>(&self, paths: I) -> RunReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut diagnostics = Diagnostics::new();
        let files: Vec<FileReport> =
            paths.into_iter().map(|p| self.check_file(p.as_ref(), &mut diagnostics)).collect();

        for failed in files.iter().filter(|f| !f.passed) {
            diagnostics.error(format!("{} failed signer verification", failed.path.display()));
        }
        RunReport { files, diagnostics }
    }

    /// Parse one file (plain or big COD) and check each of its entries.
    pub fn check_file(&self, path: &Path, diag: &mut Diagnostics) -> FileReport {
        let outcomes = match read_cod(path, diag) {
            Ok(outcomes) => outcomes,
            Err(err) => return FileReport::new(path, Vec::new(), Some(err.to_string())),
        };

        if outcomes.is_empty() {
            diag.error(format!("{} contains no COD entries", path.display()));
        }
        let entries = outcomes.iter().map(|o| self.check_entry(o, diag)).collect();
        FileReport::new(path, entries, None)
    }

    /// Apply the policy to one parse outcome, logging presence or absence of
    /// every required signer and the observed signer set.
    pub fn check_entry(&self, outcome: &ParseOutcome, diag: &mut Diagnostics) -> EntryReport {
        let entry = match outcome {
            ParseOutcome::Parsed(entry) => entry,
            ParseOutcome::BadFormat { name, reason } => {
                diag.error(format!("{name} is not a valid COD; no signatures accepted"));
                diag.error(format!("{name} is missing a signature!"));
                return EntryReport {
                    name: name.clone(),
                    signers: Vec::new(),
                    verdict: Verdict::BadFormat { reason: reason.clone() },
                };
            }
            ParseOutcome::Truncated { name, reason } => {
                diag.error(format!("{name} could not be read completely; no usable signer data"));
                diag.error(format!("{name} is missing a signature!"));
                return EntryReport {
                    name: name.clone(),
                    signers: Vec::new(),
                    verdict: Verdict::Truncated { reason: reason.clone() },
                };
            }
        };

        let name = entry.name();
        if entry.is_unsigned() {
            diag.error(format!("{name} carries no signatures"));
        }

        let mut missing = Vec::new();
        for required in self.required.iter() {
            if entry.is_signed_by(required) {
                diag.info(format!("{name} signed by {required}"));
            } else {
                diag.error(format!("{name} not signed by {required}"));
                missing.push(required.to_string());
            }
        }

        let signers: Vec<String> = entry.signers().iter().cloned().collect();
        diag.info(format!("{name} signers: [{}]", signers.join(", ")));

        let verdict = if entry.is_unsigned() {
            Verdict::Unsigned
        } else if !missing.is_empty() {
            Verdict::MissingSigners { missing }
        } else {
            Verdict::Passed
        };
        if !verdict.is_pass() {
            diag.error(format!("{name} is missing a signature!"));
        }

        EntryReport { name: name.to_string(), signers, verdict }
    }
}
