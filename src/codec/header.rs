//! Magic/version block and the length-prefixed header.
//!
//! # Layout
//! ```text
//! 0x00: magic "SEModel" [u8; 7]
//! 0x07: version u16
//! 0x09: header_size u16 (includes itself)
//! 0x0B: data_presence u8, bone_presence u8, mesh_presence u8
//! 0x0E: bone_count u32, mesh_count u32, material_count u32
//! 0x1A: reserved [u8; 3], then anything up to header_size
//! ```

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::read_block;
use crate::error::{FormatError, Result};
use crate::model::{Header, Info, MAGIC, VERSION};

pub const INFO_SIZE: usize = 9;
/// Presence bytes plus counts; the minimum a header payload must hold.
pub const HEADER_KNOWN_SIZE: usize = 3 + 3 * 4;
const HEADER_RESERVED: [u8; 3] = [0; 3];

pub fn read_info<R: Read>(reader: &mut R) -> Result<Info> {
    let mut bytes = [0u8; INFO_SIZE];
    reader.read_exact(&mut bytes)?;

    let mut magic = [0u8; 7];
    magic.copy_from_slice(&bytes[..7]);
    if &magic != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let version = u16::from_le_bytes([bytes[7], bytes[8]]);
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    Ok(Info { magic, version })
}

pub fn write_info<W: Write>(writer: &mut W, info: &Info) -> Result<()> {
    writer.write_all(&info.magic)?;
    writer.write_u16::<LittleEndian>(info.version)?;
    Ok(())
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let size = reader.read_u16::<LittleEndian>()?;
    if (size as usize) < HEADER_KNOWN_SIZE + 2 {
        return Err(FormatError::InvalidHeaderSize(size));
    }

    // Whatever follows the known fields belongs to newer writers; drop it.
    let body = read_block(reader, u64::from(size) - 2)?;
    let mut cursor = Cursor::new(&body[..HEADER_KNOWN_SIZE]);

    Ok(Header {
        data_presence: cursor.read_u8()?,
        bone_presence: cursor.read_u8()?,
        mesh_presence: cursor.read_u8()?,
        bone_count: cursor.read_u32::<LittleEndian>()?,
        mesh_count: cursor.read_u32::<LittleEndian>()?,
        material_count: cursor.read_u32::<LittleEndian>()?,
    })
}

pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<()> {
    let mut payload = Vec::with_capacity(HEADER_KNOWN_SIZE + HEADER_RESERVED.len());
    payload.write_u8(header.data_presence)?;
    payload.write_u8(header.bone_presence)?;
    payload.write_u8(header.mesh_presence)?;
    payload.write_u32::<LittleEndian>(header.bone_count)?;
    payload.write_u32::<LittleEndian>(header.mesh_count)?;
    payload.write_u32::<LittleEndian>(header.material_count)?;
    payload.write_all(&HEADER_RESERVED)?;

    writer.write_u16::<LittleEndian>(payload.len() as u16 + 2)?;
    writer.write_all(&payload)?;
    Ok(())
}
