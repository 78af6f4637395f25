//! Explicit diagnostics collector.
//!
//! Every parse and verification step appends to a `Diagnostics` value that is
//! threaded through the call and returned with the verdict. Each line is also
//! forwarded to `tracing` so frontends get live output without a second log path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// One recorded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Ordered audit trail of a parse/verify run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    lines: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.lines.push(Diagnostic { level: Level::Info, message });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.lines.push(Diagnostic { level: Level::Warn, message });
    }

    /// Error lines carry the `Error: ` prefix used in build logs.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = format!("Error: {}", message.into());
        tracing::error!("{message}");
        self.lines.push(Diagnostic { level: Level::Error, message });
    }

    pub fn lines(&self) -> &[Diagnostic] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lines.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lines.iter().filter(|d| d.level == Level::Error)
    }

    /// `true` if any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|d| d.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append another collector's lines, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.lines.extend(other.lines);
    }
}
