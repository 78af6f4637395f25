use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod commands;
pub mod logging;

/// Resolve a path argument against the current working directory.
///
/// Canonicalizes when the path exists; otherwise joins it onto the cwd so
/// reports still show an absolute location for missing files.
pub fn resolve_input_path(raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Hex SHA-256 of a COD file, reported next to its verdict in JSON output.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to hash {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}
