mod common;

use std::path::Path;

use codsign_core::{Diagnostics, ParseOutcome};
use codsign_verify::commands::{
    inspect_files, resolve_files, resolve_required_signers, verify_command,
};
use codsign_verify::logging::default_filter;
use codsign_verify::{resolve_input_path, sha256_file};
use tempfile::tempdir;

#[test]
fn signers_flag_overrides_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("signers.json");
    std::fs::write(&config, r#"{ "signers": ["RRT"] }"#).unwrap();

    let from_flag = resolve_required_signers(Some("SFDC"), Some(&config)).unwrap();
    assert_eq!(from_flag.iter().collect::<Vec<_>>(), vec!["SFDC"]);

    let from_config = resolve_required_signers(None, Some(&config)).unwrap();
    assert_eq!(from_config.iter().collect::<Vec<_>>(), vec!["RRT"]);

    assert!(resolve_required_signers(None, None).unwrap().is_empty());
}

#[test]
fn config_errors_carry_context() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("signers.json");
    std::fs::write(&config, r#"{ "signers": ["TOOLONG"] }"#).unwrap();

    let err = resolve_required_signers(None, Some(&config)).unwrap_err();
    assert!(err.to_string().contains("Invalid signer list"), "unexpected error: {err}");

    let err = resolve_required_signers(None, Some(Path::new("/nonexistent/signers.yaml")))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load signer config"), "unexpected error: {err}");
}

#[test]
fn resolve_files_requires_input() {
    let err = resolve_files(&[]).unwrap_err();
    assert!(err.to_string().contains("No COD files given"));
}

#[test]
fn resolve_input_path_keeps_missing_files_absolute() {
    let resolved = resolve_input_path("definitely-missing.cod").unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("definitely-missing.cod"));
}

#[test]
fn sha256_file_matches_known_hash() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abc.cod");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(
        sha256_file(&path).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );

    let err = sha256_file(&dir.path().join("missing.cod")).unwrap_err();
    assert!(err.to_string().contains("Failed to open"), "unexpected error: {err}");
}

#[test]
fn verify_command_returns_aggregate_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rrt.cod");
    common::write_file(&path, &common::signed_cod(&[*b"RRT\0"]));
    let file = path.to_string_lossy().to_string();

    verify_command(&[file.clone()], Some("RRT"), None, false).unwrap();
    let err = verify_command(&[file], Some("SFDC"), None, false).unwrap_err();
    assert!(err.to_string().contains("Not all cod files are signed"));
}

#[test]
fn inspect_files_reports_open_errors_per_file() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.cod");
    common::write_file(&good, &common::signed_cod(&[*b"SFDC"]));
    let missing = dir.path().join("missing.cod");
    let big = dir.path().join("big.cod");
    common::write_big_cod(
        &big,
        &[("big.cod", common::signed_cod(&[*b"SFDC"])), ("bad.cod", common::XML_BODY.into())],
    );

    let mut diag = Diagnostics::new();
    let inspected = inspect_files(&[good, missing, big], &mut diag);
    assert_eq!(inspected.len(), 3);
    assert!(inspected[0].error.is_none());
    assert_eq!(inspected[0].entries.len(), 1);
    assert!(inspected[1].error.is_some());
    assert_eq!(inspected[2].entries.len(), 2);
    assert!(inspected[2].entries[0].is_parsed());
    assert!(matches!(inspected[2].entries[1], ParseOutcome::BadFormat { .. }));
}

#[test]
fn verbosity_maps_to_filter() {
    assert_eq!(default_filter(0), "warn");
    assert_eq!(default_filter(1), "info");
    assert_eq!(default_filter(2), "debug");
    assert_eq!(default_filter(9), "trace");
}
