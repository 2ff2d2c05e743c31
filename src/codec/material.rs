use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::codec::{read_cstr, write_cstr};
use crate::error::Result;
use crate::model::{Material, MaterialData, SimpleMaterialData};

pub fn read_material<R: Read>(reader: &mut R) -> Result<Material> {
    let name = read_cstr(reader)?;
    let is_simple = reader.read_u8()? != 0;

    let data = if is_simple {
        MaterialData::Simple(SimpleMaterialData {
            diffuse_map: read_cstr(reader)?,
            normal_map: read_cstr(reader)?,
            specular_map: read_cstr(reader)?,
        })
    } else {
        MaterialData::Complex
    };

    Ok(Material { name, data })
}

pub fn write_material<W: Write>(writer: &mut W, material: &Material) -> Result<()> {
    write_cstr(writer, &material.name)?;
    match &material.data {
        MaterialData::Simple(simple) => {
            writer.write_u8(1)?;
            write_cstr(writer, &simple.diffuse_map)?;
            write_cstr(writer, &simple.normal_map)?;
            write_cstr(writer, &simple.specular_map)?;
        }
        MaterialData::Complex => writer.write_u8(0)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_simple_material_layout() {
        let material = Material::simple("wood", "images/wood_c.png", "", "images/wood_s.png");
        let mut buf = Vec::new();
        write_material(&mut buf, &material).unwrap();
        assert_eq!(buf, b"wood\0\x01images/wood_c.png\0\0images/wood_s.png\0");

        let read = read_material(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, material);
        assert_eq!(read.simple_data().unwrap().normal_map, "");
    }

    #[test]
    fn test_complex_material_has_no_payload() {
        let mut buf = b"glass\0\x00".to_vec();
        buf.extend_from_slice(b"next\0");

        let mut cursor = Cursor::new(buf);
        let read = read_material(&mut cursor).unwrap();
        assert_eq!(read.name, "glass");
        assert!(!read.is_simple());
        assert_eq!(read.data, MaterialData::Complex);
        assert_eq!(crate::codec::read_cstr(&mut cursor).unwrap(), "next");
    }

    #[test]
    fn test_any_nonzero_flag_is_simple() {
        let buf = b"m\0\x07a\0b\0c\0".to_vec();
        let read = read_material(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, Material::simple("m", "a", "b", "c"));
    }
}
