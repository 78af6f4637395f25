//! Signature block scanning.
//!
//! After the code and data payload, a COD carries zero or more signature blocks
//! until end of stream:
//!
//! - sign type: u16 little-endian, always `1`
//! - signature length `L`: u16 little-endian
//! - signer id: 4 bytes, NUL padded
//! - `L - 4` bytes of signature, skipped

use std::io::Read;

use crate::cod::reader::{read_le_u16, read_signer_id, skip_bytes};
use crate::error::{CodError, ReadError};
use crate::model::CodEntry;

/// The only sign type a COD signature block may carry.
pub const SIGN_TYPE: u16 = 1;

/// Width of the signer id slot inside a signature block.
pub const SIGNER_ID_LEN: u16 = 4;

/// Width of the COD flags word between data size and the payload.
const FLAGS_LEN: u64 = 2;

/// Read code and data sizes, then skip the flags word and both payload regions.
pub fn skip_payload<R: Read>(reader: &mut R, name: &str) -> Result<(), CodError> {
    let code_size = read_le_u16(reader).map_err(|e| CodError::from_read(e, name, "code size"))?;
    let data_size = read_le_u16(reader).map_err(|e| CodError::from_read(e, name, "data size"))?;
    let payload = FLAGS_LEN + u64::from(code_size) + u64::from(data_size);
    skip_bytes(reader, payload).map_err(|e| CodError::from_read(e, name, "code and data payload"))
}

/// Consume signature blocks until end of stream, adding each signer id to `entry`.
///
/// End of stream while reading a block's sign type is the normal exit. End of
/// stream anywhere else inside a block is an error.
pub fn scan_signatures<R: Read>(reader: &mut R, mut entry: CodEntry) -> Result<CodEntry, CodError> {
    loop {
        let sign_type = match read_le_u16(reader) {
            Ok(value) => value,
            Err(ReadError::EndOfStream) => return Ok(entry),
            Err(err) => return Err(CodError::from_read(err, entry.name(), "sign type")),
        };
        if sign_type != SIGN_TYPE {
            return Err(CodError::BadSignType { name: entry.name().to_string(), found: sign_type });
        }

        let length = read_le_u16(reader)
            .map_err(|e| CodError::from_read(e, entry.name(), "signature length"))?;
        let Some(remaining) = length.checked_sub(SIGNER_ID_LEN) else {
            return Err(CodError::SignatureTooShort { name: entry.name().to_string(), length });
        };

        let signer = read_signer_id(reader)
            .map_err(|e| CodError::from_read(e, entry.name(), "signer id"))?;
        if signer.is_empty() {
            tracing::debug!(entry = entry.name(), "ignoring blank signer id");
        } else {
            entry.add_signer(signer);
        }

        skip_bytes(reader, u64::from(remaining))
            .map_err(|e| CodError::from_read(e, entry.name(), "signature"))?;
    }
}
