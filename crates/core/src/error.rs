//! Error types for COD parsing, container dispatch, configuration, and policy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reading a fixed-width field or skipping a region.
///
/// End of stream is kept apart from other I/O failures because the signature
/// block loop treats it as normal termination.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("end of stream")]
    EndOfStream,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Classify a `std::io::Error`, folding `UnexpectedEof` into `EndOfStream`.
    pub fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ReadError::EndOfStream
        } else {
            ReadError::Io(err)
        }
    }
}

/// Structural failure while parsing one COD stream.
#[derive(Debug, Error)]
pub enum CodError {
    /// The flash id at offset 0 is not `0xDEC0FFFF`.
    #[error("{name} is not a COD (flash id {found:#010x})")]
    BadMagic { name: String, found: u32 },

    /// Header version is at or below the minimum supported version.
    #[error("{name} has header version {found}; version must be above {min}")]
    VersionTooLow { name: String, found: u16, min: u16 },

    #[error("{name}: Sign_type is not 1.  Sign_type = {found}")]
    BadSignType { name: String, found: u16 },

    /// Declared signature length cannot even hold the 4-byte signer id.
    #[error("{name}: signature length {length} is shorter than the signer id")]
    SignatureTooShort { name: String, length: u16 },

    #[error("{name}: stream ended while reading {field}")]
    UnexpectedEnd { name: String, field: &'static str },

    #[error("{name}: failed to read {field}: {source}")]
    Io {
        name: String,
        field: &'static str,
        #[source]
        source: io::Error,
    },
}

impl CodError {
    /// `true` for errors meaning "this is categorically not an acceptable COD"
    /// (wrong flash id, or version too old). Everything else is a truncated or
    /// malformed stream.
    pub fn is_bad_format(&self) -> bool {
        matches!(self, CodError::BadMagic { .. } | CodError::VersionTooLow { .. })
    }

    /// Name of the entry the error was raised for.
    pub fn name(&self) -> &str {
        match self {
            CodError::BadMagic { name, .. }
            | CodError::VersionTooLow { name, .. }
            | CodError::BadSignType { name, .. }
            | CodError::SignatureTooShort { name, .. }
            | CodError::UnexpectedEnd { name, .. }
            | CodError::Io { name, .. } => name,
        }
    }

    /// Attach entry context to a low-level read failure.
    pub(crate) fn from_read(err: ReadError, name: &str, field: &'static str) -> Self {
        match err {
            ReadError::EndOfStream => CodError::UnexpectedEnd { name: name.to_string(), field },
            ReadError::Io(source) => CodError::Io { name: name.to_string(), field, source },
        }
    }
}

/// Configuration problems. These abort a run before any file is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid COD Signer ID: '{id}' (at most {max} characters)")]
    SignerTooLong { id: String, max: usize },

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported config format for {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: PathBuf },
}

/// A file could not be dispatched to the parser at all.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Recognised as an archive but the archive itself is unreadable.
    #[error("Encountered unexpected error while reading big cod file {path}: {message}")]
    Archive { path: PathBuf, message: String },
}

/// Aggregate failure of a verification run.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Not all cod files are signed ({} failing)", failed.len())]
    NotAllSigned { failed: Vec<PathBuf> },
}
