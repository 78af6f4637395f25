mod common;

use codsign_core::container::{open_archive, ArchiveProbe};
use codsign_core::{read_cod, ContainerError, Diagnostics, ParseOutcome};
use tempfile::tempdir;

use common::{signed_cod, write_big_cod, write_file};

#[test]
fn plain_cod_yields_one_entry_named_after_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.cod");
    write_file(&path, &signed_cod(&[*b"SFDC"]));

    let mut diag = Diagnostics::new();
    let outcomes = read_cod(&path, &mut diag).expect("read");
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].name(), "app.cod");
    assert!(outcomes[0].entry().unwrap().is_signed_by("SFDC"));
    assert!(diag.contains("May not be a big COD: opening normally"));
}

#[test]
fn big_cod_yields_one_entry_per_sibling() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.cod");
    write_big_cod(
        &path,
        &[
            ("big.cod", signed_cod(&[*b"SFDC", *b"RRT\0"])),
            ("big-1.cod", signed_cod(&[*b"RRT\0"])),
        ],
    );

    let mut diag = Diagnostics::new();
    let outcomes = read_cod(&path, &mut diag).expect("read");
    let names: Vec<&str> = outcomes.iter().map(ParseOutcome::name).collect();
    assert_eq!(names, vec!["big.cod/big.cod", "big.cod/big-1.cod"]);
    assert!(outcomes[0].entry().unwrap().is_signed_by("SFDC"));
    assert!(!outcomes[1].entry().unwrap().is_signed_by("SFDC"));
    assert!(!diag.contains("May not be a big COD"));
}

#[test]
fn bad_sibling_does_not_stop_the_others() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.cod");
    write_big_cod(
        &path,
        &[
            ("mixed.cod", common::XML_BODY.as_bytes().to_vec()),
            ("mixed-1.cod", signed_cod(&[*b"SFDC"])),
        ],
    );

    let mut diag = Diagnostics::new();
    let outcomes = read_cod(&path, &mut diag).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0], ParseOutcome::BadFormat { .. }));
    assert!(outcomes[1].is_parsed());
}

#[test]
fn directory_member_yields_its_own_failing_entry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dirs.cod");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    writer.add_directory("siblings/", options).unwrap();
    writer.start_file("siblings/a.cod", options).unwrap();
    std::io::Write::write_all(&mut writer, &signed_cod(&[*b"RCR\0"])).unwrap();
    writer.finish().unwrap();

    let mut diag = Diagnostics::new();
    let outcomes = read_cod(&path, &mut diag).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].name(), "dirs.cod/siblings/");
    assert!(matches!(outcomes[0], ParseOutcome::Truncated { .. }));
    assert_eq!(outcomes[1].name(), "dirs.cod/siblings/a.cod");
    assert!(outcomes[1].entry().unwrap().is_signed_by("RCR"));
}

#[test]
fn non_archive_is_probed_as_not_archive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test_badfile.cod");
    write_file(&path, common::XML_BODY.as_bytes());

    assert!(matches!(open_archive(&path), Ok(ArchiveProbe::NotArchive)));

    let mut diag = Diagnostics::new();
    let outcomes = read_cod(&path, &mut diag).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], ParseOutcome::BadFormat { .. }));
}

#[test]
fn missing_file_is_a_container_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.cod");

    let mut diag = Diagnostics::new();
    let err = read_cod(&path, &mut diag).unwrap_err();
    assert!(matches!(err, ContainerError::Open { .. }));
    assert_eq!(diag.errors().count(), 1);
}
