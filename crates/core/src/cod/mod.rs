//! COD header and signature-trailer parsing.
//!
//! Layout of one COD stream (offsets from the start of the stream):
//!
//! | Offset        | Field            | Encoding          |
//! |---------------|------------------|-------------------|
//! | 0             | flash id         | `DE C0 FF FF`     |
//! | 4..36         | reserved         | skipped           |
//! | 36            | version          | u16 little-endian |
//! | 38            | code size        | u16 little-endian |
//! | 40            | data size        | u16 little-endian |
//! | 42            | flags            | 2 bytes, skipped  |
//! | 44            | code + data      | skipped           |
//! | ..EOF         | signature blocks | see `scanner`     |
//!
//! Payload bytes are never interpreted and signatures are not cryptographically
//! checked; only the signer ids are collected.

pub mod header;
pub mod reader;
pub mod scanner;

use std::io::Read;

use crate::diagnostics::Diagnostics;
use crate::error::CodError;
use crate::model::{CodEntry, ParseOutcome};

pub use header::{check_version, read_version, validate_magic, COD_MAGIC, MIN_VERSION};
pub use reader::{read_le_u16, read_signer_id, skip_bytes};
pub use scanner::{scan_signatures, skip_payload, SIGNER_ID_LEN, SIGN_TYPE};

/// Parse one COD stream from its first byte to end of stream.
///
/// Runs the full header-then-trailer sequence and returns the signer set, or the
/// first structural error encountered.
pub fn parse_cod_entry<R: Read>(reader: &mut R, name: &str) -> Result<CodEntry, CodError> {
    validate_magic(reader, name)?;
    let version = read_version(reader).map_err(|e| CodError::from_read(e, name, "version"))?;
    check_version(version, name)?;
    skip_payload(reader, name)?;
    scan_signatures(reader, CodEntry::new(name))
}

/// Parse one COD stream, logging the result to `diag`.
///
/// Never fails: structural errors come back as `ParseOutcome::BadFormat` or
/// `ParseOutcome::Truncated` so sibling entries keep being processed.
pub fn parse_cod<R: Read>(reader: &mut R, name: &str, diag: &mut Diagnostics) -> ParseOutcome {
    match parse_cod_entry(reader, name) {
        Ok(entry) => {
            tracing::debug!(entry = name, signers = entry.signers().len(), "parsed COD");
            ParseOutcome::Parsed(entry)
        }
        Err(err) => {
            diag.warn(err.to_string());
            match &err {
                CodError::VersionTooLow { .. } => {
                    diag.error(format!("File version not above {MIN_VERSION}."));
                }
                CodError::BadMagic { .. } => diag.error("Bad COD file."),
                _ => diag.error("Failed to read file."),
            }
            ParseOutcome::from(err)
        }
    }
}
