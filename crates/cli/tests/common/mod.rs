//! COD fixtures for CLI tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// COD header with an 8-byte code and 4-byte data payload and no signature blocks.
pub fn header(version: u16) -> Vec<u8> {
    let mut out = vec![0xDE, 0xC0, 0xFF, 0xFF];
    out.resize(36, 0);
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&[8, 0, 4, 0, 0, 0]);
    out.resize(out.len() + 12, 0xAA);
    out
}

/// Version-75 COD with one 132-byte signature block per signer.
pub fn signed_cod(signers: &[[u8; 4]]) -> Vec<u8> {
    signers.iter().fold(header(75), |mut out, id| {
        out.extend_from_slice(&[1, 0, 132, 0]);
        out.extend_from_slice(id);
        out.resize(out.len() + 128, 0x5A);
        out
    })
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).expect("write fixture");
}

pub fn write_big_cod(path: &Path, members: &[(&str, Vec<u8>)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).expect("create big cod"));
    for (name, bytes) in members {
        writer.start_file(*name, zip::write::SimpleFileOptions::default()).expect("start member");
        writer.write_all(bytes).expect("write member");
    }
    writer.finish().expect("finish big cod");
}

pub const XML_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project name="not-a-cod" default="build"/>
"#;
