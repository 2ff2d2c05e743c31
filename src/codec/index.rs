use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

/// On-disk width of a bone or vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Narrowest width that can address `count` elements.
    pub fn for_count(count: u32) -> Self {
        if count <= 0xFF {
            Self::U8
        } else if count <= 0xFFFF {
            Self::U16
        } else {
            Self::U32
        }
    }

    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Decodes one index from the front of `bytes`.
    pub fn decode(self, bytes: &[u8]) -> u32 {
        match self {
            Self::U8 => u32::from(bytes[0]),
            Self::U16 => u32::from(LittleEndian::read_u16(bytes)),
            Self::U32 => LittleEndian::read_u32(bytes),
        }
    }

    /// Writes `value` truncated to this width.
    pub fn write<W: Write>(self, writer: &mut W, value: u32) -> std::io::Result<()> {
        match self {
            Self::U8 => writer.write_u8(value as u8),
            Self::U16 => writer.write_u16::<LittleEndian>(value as u16),
            Self::U32 => writer.write_u32::<LittleEndian>(value),
        }
    }
}

pub fn width_for(count: u32) -> usize {
    IndexWidth::for_count(count).size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_boundaries() {
        assert_eq!(width_for(0), 1);
        assert_eq!(width_for(255), 1);
        assert_eq!(width_for(256), 2);
        assert_eq!(width_for(65535), 2);
        assert_eq!(width_for(65536), 4);
        assert_eq!(width_for(u32::MAX), 4);
    }

    #[test]
    fn test_encode_decode_each_width() {
        for (width, value, len) in [
            (IndexWidth::U8, 0xABu32, 1usize),
            (IndexWidth::U16, 0xBEEF, 2),
            (IndexWidth::U32, 0xDEAD_BEEF, 4),
        ] {
            let mut buf = Vec::new();
            width.write(&mut buf, value).unwrap();
            assert_eq!(buf.len(), len);
            assert_eq!(width.decode(&buf), value);
        }
    }

    #[test]
    fn test_u16_is_little_endian() {
        let mut buf = Vec::new();
        IndexWidth::U16.write(&mut buf, 0x0102).unwrap();
        assert_eq!(buf, vec![0x02, 0x01]);
    }
}
