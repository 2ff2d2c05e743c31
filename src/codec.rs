//! Binary reader/writer for the SEModel container.
//!
//! The stream is strictly forward: every block is read in the order it was
//! written and nothing seeks.

pub mod bone;
pub mod header;
pub mod index;
pub mod load;
pub mod material;
pub mod mesh;
pub mod save;

use std::io::{Read, Write};

use crate::error::{FormatError, Result};

/// Reads a NUL-terminated UTF-8 string.
pub(crate) fn read_cstr<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    let mut b = [0u8; 1];
    loop {
        reader.read_exact(&mut b)?;
        if b[0] == 0 {
            break;
        }
        bytes.push(b[0]);
    }
    Ok(String::from_utf8(bytes)?)
}

pub(crate) fn write_cstr<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    // An interior NUL would end the string early on read.
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    writer.write_all(&bytes[..end])?;
    writer.write_all(&[0])?;
    Ok(())
}

/// Reads exactly `len` bytes without trusting `len` for the allocation up front.
///
/// Counts come straight from the file, so a corrupt count must end in
/// `TruncatedStream` rather than a huge allocation.
pub(crate) fn read_block<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(FormatError::TruncatedStream);
    }
    Ok(buf)
}
