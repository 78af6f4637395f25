//! Parsed COD records.
//!
//! - `CodEntry`: the signer set found in one COD stream (a plain file or a big-COD member).
//! - `ParseOutcome`: either a `CodEntry` or a tagged structural failure, so callers never
//!   confuse "malformed input" with "valid COD carrying zero signatures".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CodError;

/// Signing information for one COD stream.
///
/// Built incrementally while the signature blocks are scanned, then handed out
/// read-only. `signers` is always a set, empty when no block was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodEntry {
    name: String,
    signers: BTreeSet<String>,
}

impl CodEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), signers: BTreeSet::new() }
    }

    /// Record a signer. Returns `true` if it was not already present.
    pub(crate) fn add_signer(&mut self, signer: impl Into<String>) -> bool {
        self.signers.insert(signer.into())
    }

    /// Entry label: the file name, or `container/member` for big-COD siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signers(&self) -> &BTreeSet<String> {
        &self.signers
    }

    pub fn is_signed_by(&self, signer: &str) -> bool {
        self.signers.contains(signer)
    }

    pub fn is_unsigned(&self) -> bool {
        self.signers.is_empty()
    }
}

/// Result of parsing one COD stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Header accepted and the block loop reached end of stream cleanly.
    Parsed(CodEntry),
    /// Wrong flash id or a header version that is too old.
    BadFormat { name: String, reason: String },
    /// Anything else: short reads, bad sign type, underflowing lengths, I/O failures.
    Truncated { name: String, reason: String },
}

impl ParseOutcome {
    pub fn name(&self) -> &str {
        match self {
            ParseOutcome::Parsed(entry) => entry.name(),
            ParseOutcome::BadFormat { name, .. } | ParseOutcome::Truncated { name, .. } => name,
        }
    }

    pub fn entry(&self) -> Option<&CodEntry> {
        match self {
            ParseOutcome::Parsed(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }
}

impl From<CodError> for ParseOutcome {
    fn from(err: CodError) -> Self {
        let name = err.name().to_string();
        let reason = err.to_string();
        if err.is_bad_format() {
            ParseOutcome::BadFormat { name, reason }
        } else {
            ParseOutcome::Truncated { name, reason }
        }
    }
}
