//! Fixed-width field readers over a byte stream.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::ReadError;

/// Read two bytes as `low | (high << 8)`.
///
/// Consumes exactly two bytes on success. A stream that ends before the second
/// byte yields `ReadError::EndOfStream`.
pub fn read_le_u16<R: Read>(reader: &mut R) -> Result<u16, ReadError> {
    reader.read_u16::<LittleEndian>().map_err(ReadError::from_io)
}

/// Discard exactly `count` bytes.
///
/// A stream shorter than `count` is reported as `EndOfStream`.
pub fn skip_bytes<R: Read>(reader: &mut R, count: u64) -> Result<(), ReadError> {
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped < count {
        return Err(ReadError::EndOfStream);
    }
    Ok(())
}

/// Read a 4-byte signer slot.
///
/// NUL bytes are dropped (not kept as padding), the remaining bytes are taken as
/// single-byte characters in read order, and surrounding whitespace is trimmed.
/// `R R \0 \0` yields `"RR"`.
pub fn read_signer_id<R: Read>(reader: &mut R) -> Result<String, ReadError> {
    let mut slot = [0u8; 4];
    reader.read_exact(&mut slot).map_err(ReadError::from_io)?;
    let id: String = slot.iter().filter(|&&b| b != 0).map(|&b| char::from(b)).collect();
    Ok(id.trim().to_string())
}
