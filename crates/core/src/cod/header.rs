//! Flash id and version checks at the start of a COD stream.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::cod::reader::{read_le_u16, skip_bytes};
use crate::error::{CodError, ReadError};

/// Flash id every COD starts with, read big-endian.
pub const COD_MAGIC: u32 = 0xDEC0_FFFF;

/// Header versions at or below this are rejected.
pub const MIN_VERSION: u16 = 74;

/// Distance from the end of the flash id to the version field.
const VERSION_OFFSET: u64 = 32;

/// Check the 4-byte flash id. Advances the stream by exactly 4 bytes.
pub fn validate_magic<R: Read>(reader: &mut R, name: &str) -> Result<(), CodError> {
    let found = reader
        .read_u32::<BigEndian>()
        .map_err(|e| CodError::from_read(ReadError::from_io(e), name, "flash id"))?;
    if found != COD_MAGIC {
        return Err(CodError::BadMagic { name: name.to_string(), found });
    }
    Ok(())
}

/// Skip the reserved header bytes and read the version word.
///
/// Expects the stream to sit just past the flash id; on return it sits at offset 38.
pub fn read_version<R: Read>(reader: &mut R) -> Result<u16, ReadError> {
    skip_bytes(reader, VERSION_OFFSET)?;
    read_le_u16(reader)
}

/// Accept only versions strictly above `MIN_VERSION`.
pub fn check_version(version: u16, name: &str) -> Result<u16, CodError> {
    if version <= MIN_VERSION {
        return Err(CodError::VersionTooLow {
            name: name.to_string(),
            found: version,
            min: MIN_VERSION,
        });
    }
    Ok(version)
}
