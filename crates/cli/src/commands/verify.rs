use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use codsign_core::{Diagnostics, FileReport, SignatureVerifier, Verdict};
use serde::Serialize;

use crate::commands::{resolve_files, resolve_required_signers};
use crate::sha256_file;

/// Per-file entry of the JSON report.
#[derive(Debug, Serialize)]
pub struct FileSummary<'a> {
    #[serde(flatten)]
    pub report: &'a FileReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Machine-readable output of `verify --json`.
#[derive(Debug, Serialize)]
pub struct VerifyOutput<'a> {
    pub checked_at: String,
    pub verifier_version: &'static str,
    pub required: Vec<&'a str>,
    pub passed: bool,
    pub files: Vec<FileSummary<'a>>,
    pub diagnostics: &'a Diagnostics,
}

/// Check every file against the required signers.
///
/// Returns an error (the aggregate failure signal) when any file fails.
pub fn verify_command(
    files: &[String],
    signers: Option<&str>,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let required = resolve_required_signers(signers, config)?;
    let paths = resolve_files(files)?;

    let verifier = SignatureVerifier::new(required);
    let report = verifier.run(&paths);

    if json {
        let output = VerifyOutput {
            checked_at: Utc::now().to_rfc3339(),
            verifier_version: codsign_core::version(),
            required: verifier.required().iter().collect(),
            passed: report.passed(),
            files: report
                .files
                .iter()
                .map(|f| FileSummary { report: f, sha256: sha256_file(&f.path).ok() })
                .collect(),
            diagnostics: &report.diagnostics,
        };
        let serialized =
            serde_json::to_string_pretty(&output).context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
    } else {
        let required: Vec<&str> = verifier.required().iter().collect();
        println!(
            "Checked {} file(s) against required signers [{}]",
            report.files.len(),
            required.join(", ")
        );
        for file in &report.files {
            print_file_report(file);
        }

        let failed: Vec<_> = report.failed_files().collect();
        if !failed.is_empty() {
            println!("Failed files:");
            for file in failed {
                println!("  - {}", file.path.display());
            }
        }
    }

    report.ensure_passed()?;
    Ok(())
}

fn print_file_report(file: &FileReport) {
    let status = if file.passed { "PASS" } else { "FAIL" };
    println!("{status} {}", file.path.display());

    if let Some(err) = &file.error {
        println!("  error: {err}");
        return;
    }
    if file.entries.is_empty() {
        println!("  (no COD entries)");
    }
    for entry in &file.entries {
        let signers = entry.signers.join(", ");
        match &entry.verdict {
            Verdict::Passed => println!("  - {}: signed by [{}]", entry.name, signers),
            Verdict::Unsigned => println!("  - {}: not signed", entry.name),
            Verdict::MissingSigners { missing } => println!(
                "  - {}: missing [{}] (signed by [{}])",
                entry.name,
                missing.join(", "),
                signers
            ),
            Verdict::BadFormat { reason } => println!("  - {}: bad COD ({reason})", entry.name),
            Verdict::Truncated { reason } => {
                println!("  - {}: unreadable ({reason})", entry.name)
            }
        }
    }
}
