//! Big-COD versus single-COD dispatch.
//!
//! A "big" COD is a zip archive whose members are ordinary COD streams (siblings).
//! Anything that does not open as an archive is parsed as one COD stream.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::cod::parse_cod;
use crate::diagnostics::Diagnostics;
use crate::error::ContainerError;
use crate::model::ParseOutcome;

/// Result of probing a file for archive structure.
pub enum ArchiveProbe {
    /// The file is a zip archive of COD siblings.
    Archive(ZipArchive<BufReader<File>>),
    /// The content is not a recognised archive; parse the file as one COD.
    NotArchive,
}

/// Label used for a file in entry names and diagnostics.
pub fn container_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Try to open `path` as a zip archive.
///
/// "Not an archive" is a normal `Ok` result; only failures to open or read the
/// file itself are errors.
pub fn open_archive(path: &Path) -> Result<ArchiveProbe, ContainerError> {
    let file = File::open(path)
        .map_err(|source| ContainerError::Open { path: path.to_path_buf(), source })?;

    match ZipArchive::new(BufReader::new(file)) {
        Ok(archive) => Ok(ArchiveProbe::Archive(archive)),
        Err(ZipError::InvalidArchive(_)) | Err(ZipError::UnsupportedArchive(_)) => {
            Ok(ArchiveProbe::NotArchive)
        }
        Err(ZipError::Io(source)) => {
            Err(ContainerError::Open { path: path.to_path_buf(), source })
        }
        Err(other) => {
            Err(ContainerError::Archive { path: path.to_path_buf(), message: other.to_string() })
        }
    }
}

/// Read every COD stream contained in `path`.
///
/// Big CODs yield one outcome per member, named `<file>/<member>`. Plain files
/// yield exactly one outcome named after the file. Parse failures never abort the
/// loop; they come back as failing outcomes.
pub fn read_cod(path: &Path, diag: &mut Diagnostics) -> Result<Vec<ParseOutcome>, ContainerError> {
    let name = container_name(path);
    match open_archive(path) {
        Ok(ArchiveProbe::Archive(archive)) => Ok(read_archive(archive, &name, diag)),
        Ok(ArchiveProbe::NotArchive) => {
            diag.info("May not be a big COD: opening normally");
            read_single(path, &name, diag).map(|outcome| vec![outcome])
        }
        Err(err) => {
            diag.error(err.to_string());
            Err(err)
        }
    }
}

/// Parse each member of an open archive. The archive is dropped on return.
pub fn read_archive<R: Read + Seek>(
    mut archive: ZipArchive<R>,
    container: &str,
    diag: &mut Diagnostics,
) -> Vec<ParseOutcome> {
    let mut outcomes = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut member = match archive.by_index(index) {
            Ok(member) => member,
            Err(err) => {
                let name = format!("{container}/#{index}");
                diag.warn(format!("{name}: {err}"));
                diag.error("Failed to read file.");
                outcomes.push(ParseOutcome::Truncated { name, reason: err.to_string() });
                continue;
            }
        };
        let name = format!("{container}/{}", member.name());
        outcomes.push(parse_cod(&mut member, &name, diag));
    }
    outcomes
}

fn read_single(
    path: &Path,
    name: &str,
    diag: &mut Diagnostics,
) -> Result<ParseOutcome, ContainerError> {
    let file = File::open(path).map_err(|source| {
        let err = ContainerError::Open { path: path.to_path_buf(), source };
        diag.error(err.to_string());
        err
    })?;
    let mut reader = BufReader::new(file);
    Ok(parse_cod(&mut reader, name, diag))
}
