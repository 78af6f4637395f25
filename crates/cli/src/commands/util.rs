use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use codsign_core::{RequiredSigners, VerifyConfig};

use crate::resolve_input_path;

/// Work out the required signer set.
///
/// `--signers` wins over `--config`. With neither, the set is empty and any
/// signed COD passes.
pub fn resolve_required_signers(
    signers: Option<&str>,
    config: Option<&Path>,
) -> Result<RequiredSigners> {
    if let Some(list) = signers {
        return RequiredSigners::parse(list).context("Invalid --signers list");
    }
    if let Some(path) = config {
        let config = VerifyConfig::load(path)
            .with_context(|| format!("Failed to load signer config {}", path.display()))?;
        return config
            .required_signers()
            .with_context(|| format!("Invalid signer list in {}", path.display()));
    }
    tracing::warn!("No required signers configured; any signed COD will pass");
    Ok(RequiredSigners::default())
}

/// Resolve every file argument; at least one is required.
pub fn resolve_files(files: &[String]) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        return Err(anyhow!("No COD files given"));
    }
    files.iter().map(|f| resolve_input_path(f)).collect()
}
