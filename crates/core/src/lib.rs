//! codsign-core
//!
//! Core library for checking that COD application binaries carry signatures from a
//! required set of signing authorities.
//!
//! This crate defines the COD header/trailer parser, the big-COD container dispatch,
//! the signer-policy verifier, and the diagnostics collector that records every
//! presence/absence decision.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, build-pipeline hooks, etc.). Frontends supply the list
//! of paths and consume the verdict.

pub mod cod;
pub mod config;
pub mod container;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod policy;

pub use cod::{parse_cod, COD_MAGIC, MIN_VERSION};
pub use config::{RequiredSigners, VerifyConfig, MAX_SIGNER_ID_LEN};
pub use container::read_cod;
pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use error::{CodError, ConfigError, ContainerError, PolicyError, ReadError};
pub use model::{CodEntry, ParseOutcome};
pub use policy::{EntryReport, FileReport, RunReport, SignatureVerifier, Verdict};

/// Crate version, stamped into verification reports so an audit trail names
/// the parser that produced it.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
