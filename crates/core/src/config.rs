//! Required-signer configuration.
//!
//! Signers come either from a comma-delimited list (`"RRT, RCR, SFDC"`) or from a
//! small JSON/YAML config file:
//!
//! ```yaml
//! signers: [RRT, RCR, SFDC]
//! ```
//!
//! Every id is validated before any COD is read.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum length of a signer id, in characters.
pub const MAX_SIGNER_ID_LEN: usize = 4;

/// The set of signer ids every checked COD must carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredSigners {
    ids: BTreeSet<String>,
}

impl RequiredSigners {
    /// Parse a comma-delimited list. Whitespace around each id is ignored, so
    /// `"RRT, RCR"` and `"RRT,RCR"` are the same set. Empty pieces are skipped.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        Self::from_ids(list.split(','))
    }

    pub fn from_ids<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for raw in ids {
            let id = raw.as_ref().trim();
            if id.is_empty() {
                continue;
            }
            if id.chars().count() > MAX_SIGNER_ID_LEN {
                return Err(ConfigError::SignerTooLong {
                    id: id.to_string(),
                    max: MAX_SIGNER_ID_LEN,
                });
            }
            set.insert(id.to_string());
        }
        Ok(Self { ids: set })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromStr for RequiredSigners {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// On-disk verification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Signer ids required on every COD.
    #[serde(default)]
    pub signers: Vec<String>,
}

impl VerifyConfig {
    pub fn new(signers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { signers: signers.into_iter().map(Into::into).collect() }
    }

    /// Load a config from `.json`, `.yaml` or `.yml`, chosen by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext =
            path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        if !matches!(ext.as_str(), "json" | "yaml" | "yml") {
            return Err(ConfigError::UnsupportedFormat { path: path.to_path_buf() });
        }

        let body = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        let parsed = if ext == "json" {
            serde_json::from_str(&body).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&body).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })
    }

    /// Validate and convert the configured ids.
    pub fn required_signers(&self) -> Result<RequiredSigners, ConfigError> {
        RequiredSigners::from_ids(&self.signers)
    }
}
