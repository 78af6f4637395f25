//! Builders for synthetic COD streams and big-COD archives.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const MAGIC: [u8; 4] = [0xDE, 0xC0, 0xFF, 0xFF];

/// Flash id, reserved bytes, version, code/data sizes, flags, and a filler payload.
pub fn header(version: u16, code_size: u16, data_size: u16) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&[0u8; 32]);
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&code_size.to_le_bytes());
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(&[0x00, 0x00]);
    out.extend(std::iter::repeat(0xAA).take(usize::from(code_size) + usize::from(data_size)));
    out
}

/// One signature block with `length - 4` bytes of filler signature.
pub fn block(sign_type: u16, length: u16, id: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&sign_type.to_le_bytes());
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(&id);
    out.extend(std::iter::repeat(0x5A).take(usize::from(length.saturating_sub(4))));
    out
}

/// A well-formed COD (version 75) signed by each id in `signers`.
pub fn signed_cod(signers: &[[u8; 4]]) -> Vec<u8> {
    let mut out = header(75, 16, 8);
    for id in signers {
        out.extend(block(1, 132, *id));
    }
    out
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).expect("write fixture");
}

/// Write a zip archive with the given `(member name, bytes)` pairs.
pub fn write_big_cod(path: &Path, members: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("create big cod");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in members {
        writer.start_file(*name, options).expect("start member");
        writer.write_all(bytes).expect("write member");
    }
    writer.finish().expect("finish big cod");
}

pub const XML_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project name="not-a-cod" default="build">
  <target name="build"/>
</project>
"#;
