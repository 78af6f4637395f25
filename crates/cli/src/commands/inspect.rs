use std::path::PathBuf;

use anyhow::{Context, Result};
use codsign_core::{read_cod, Diagnostics, ParseOutcome};
use serde::Serialize;

use crate::commands::resolve_files;

/// Parse result for one file, as emitted by `inspect --json`.
#[derive(Debug, Serialize)]
pub struct InspectedFile {
    pub path: PathBuf,
    pub entries: Vec<ParseOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse each file and collect its entries without applying any policy.
pub fn inspect_files(paths: &[PathBuf], diag: &mut Diagnostics) -> Vec<InspectedFile> {
    paths
        .iter()
        .map(|path| match read_cod(path, diag) {
            Ok(entries) => InspectedFile { path: path.clone(), entries, error: None },
            Err(err) => InspectedFile {
                path: path.clone(),
                entries: Vec::new(),
                error: Some(err.to_string()),
            },
        })
        .collect()
}

/// Print the signer set found in every entry of every file.
pub fn inspect_command(files: &[String], json: bool) -> Result<()> {
    let paths = resolve_files(files)?;
    let mut diag = Diagnostics::new();
    let inspected = inspect_files(&paths, &mut diag);

    if json {
        let serialized = serde_json::to_string_pretty(&inspected)
            .context("Failed to serialize inspection to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    for file in &inspected {
        println!("{}", file.path.display());
        if let Some(err) = &file.error {
            println!("  error: {err}");
            continue;
        }
        if file.entries.is_empty() {
            println!("  (no COD entries)");
        }
        for outcome in &file.entries {
            match outcome {
                ParseOutcome::Parsed(entry) => {
                    let signers: Vec<&str> = entry.signers().iter().map(String::as_str).collect();
                    println!("  - {}: [{}]", entry.name(), signers.join(", "));
                }
                ParseOutcome::BadFormat { name, reason } => {
                    println!("  - {name}: bad COD ({reason})")
                }
                ParseOutcome::Truncated { name, reason } => {
                    println!("  - {name}: unreadable ({reason})")
                }
            }
        }
    }

    Ok(())
}
