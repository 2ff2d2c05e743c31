use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::{read_cstr, write_cstr};
use crate::error::{FormatError, Result};
use crate::model::{Bone, BoneFields, Transform};

fn read_vec3<R: Read>(reader: &mut R) -> Result<[f32; 3]> {
    let mut v = [0f32; 3];
    reader.read_f32_into::<LittleEndian>(&mut v)?;
    Ok(v)
}

fn read_transform<R: Read>(reader: &mut R) -> Result<Transform> {
    let mut data = [0f32; 7];
    reader.read_f32_into::<LittleEndian>(&mut data)?;
    Ok(Transform {
        position: [data[0], data[1], data[2]],
        rotation: [data[3], data[4], data[5], data[6]],
    })
}

fn write_floats<W: Write>(writer: &mut W, values: &[f32]) -> Result<()> {
    for &v in values {
        writer.write_f32::<LittleEndian>(v)?;
    }
    Ok(())
}

fn write_transform<W: Write>(writer: &mut W, t: &Transform) -> Result<()> {
    write_floats(writer, &t.position)?;
    write_floats(writer, &t.rotation)
}

/// Reads `count` bones: every name first, then every fixed-width record.
pub fn read_bones<R: Read>(reader: &mut R, count: u32, fields: BoneFields) -> Result<Vec<Bone>> {
    let mut bones = Vec::new();
    for _ in 0..count {
        bones.push(Bone::new(read_cstr(reader)?, -1));
    }

    for (index, bone) in bones.iter_mut().enumerate() {
        bone.flags = reader.read_u8()?;
        bone.parent = reader.read_i32::<LittleEndian>()?;

        // Parents come before their children; anything else is corrupt.
        if bone.parent < -1 || bone.parent >= index as i32 {
            return Err(FormatError::out_of_range("bone parent", bone.parent, index));
        }

        if fields.global {
            bone.global = Some(read_transform(reader)?);
        }
        if fields.local {
            bone.local = Some(read_transform(reader)?);
        }
        if fields.scale {
            bone.scale = Some(read_vec3(reader)?);
        }
    }

    Ok(bones)
}

/// Writes the bone table. A bone lacking a field the table carries gets the default.
pub fn write_bones<W: Write>(writer: &mut W, bones: &[Bone], fields: BoneFields) -> Result<()> {
    for bone in bones {
        write_cstr(writer, &bone.name)?;
    }

    for bone in bones {
        writer.write_u8(bone.flags)?;
        writer.write_i32::<LittleEndian>(bone.parent)?;

        if fields.global {
            write_transform(writer, &bone.global.unwrap_or_default())?;
        }
        if fields.local {
            write_transform(writer, &bone.local.unwrap_or_default())?;
        }
        if fields.scale {
            write_floats(writer, &bone.scale())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ALL: BoneFields = BoneFields {
        global: true,
        local: true,
        scale: true,
    };

    fn skeleton() -> Vec<Bone> {
        let mut root = Bone::new("tag_origin", -1);
        root.global = Some(Transform::default());
        root.local = Some(Transform::default());
        root.scale = Some([1.0, 1.0, 1.0]);

        let mut spine = Bone::new("j_spine", 0);
        spine.flags = 0x1;
        spine.global = Some(Transform::new([0.0, 0.0, 10.0], [0.0, 0.0, 0.7071, 0.7071]));
        spine.local = Some(Transform::new([0.0, 0.0, 10.0], [0.0, 0.0, 0.7071, 0.7071]));
        spine.scale = Some([1.0, 2.0, 1.0]);

        vec![root, spine]
    }

    #[test]
    fn test_names_precede_records() {
        let mut buf = Vec::new();
        write_bones(&mut buf, &skeleton(), BoneFields::default()).unwrap();
        assert!(buf.starts_with(b"tag_origin\0j_spine\0"));
        // Two records of flags + parent.
        assert_eq!(buf.len(), "tag_origin\0j_spine\0".len() + 2 * 5);
    }

    #[test]
    fn test_full_record_size() {
        let mut buf = Vec::new();
        write_bones(&mut buf, &skeleton(), ALL).unwrap();
        assert_eq!(buf.len(), "tag_origin\0j_spine\0".len() + 2 * (5 + 28 + 28 + 12));

        let bones = read_bones(&mut Cursor::new(buf), 2, ALL).unwrap();
        assert_eq!(bones, skeleton());
    }

    #[test]
    fn test_absent_fields_stay_none() {
        let mut buf = Vec::new();
        let fields = BoneFields {
            global: false,
            local: true,
            scale: false,
        };
        write_bones(&mut buf, &skeleton(), fields).unwrap();

        let bones = read_bones(&mut Cursor::new(buf), 2, fields).unwrap();
        assert!(bones[1].global.is_none());
        assert!(bones[1].scale.is_none());
        assert_eq!(bones[1].scale(), [1.0, 1.0, 1.0]);
        assert_eq!(bones[1].local_position(), [0.0, 0.0, 10.0]);
        assert_eq!(bones[1].local_rotation(), [0.0, 0.0, 0.7071, 0.7071]);
        assert_eq!(bones[1].global_position(), [0.0, 0.0, 0.0]);
        assert_eq!(bones[1].global_rotation(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(bones[1].flags, 0x1);
    }

    #[test]
    fn test_missing_field_written_as_default() {
        let mut bones = skeleton();
        bones[0].scale = None;
        let mut buf = Vec::new();
        write_bones(&mut buf, &bones, ALL).unwrap();

        let read = read_bones(&mut Cursor::new(buf), 2, ALL).unwrap();
        assert_eq!(read[0].scale, Some([1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_forward_parent_rejected() {
        let bones = vec![Bone::new("a", 1), Bone::new("b", -1)];
        let mut buf = Vec::new();
        write_bones(&mut buf, &bones, BoneFields::default()).unwrap();

        let err = read_bones(&mut Cursor::new(buf), 2, BoneFields::default()).unwrap_err();
        assert!(matches!(err, FormatError::IndexOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_self_parent_rejected() {
        let bones = vec![Bone::new("a", -1), Bone::new("b", 1)];
        let mut buf = Vec::new();
        write_bones(&mut buf, &bones, BoneFields::default()).unwrap();

        assert!(matches!(
            read_bones(&mut Cursor::new(buf), 2, BoneFields::default()),
            Err(FormatError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_truncated_record() {
        let mut buf = Vec::new();
        write_bones(&mut buf, &skeleton(), ALL).unwrap();
        buf.truncate(buf.len() - 4);
        assert!(matches!(
            read_bones(&mut Cursor::new(buf), 2, ALL),
            Err(FormatError::TruncatedStream)
        ));
    }
}
