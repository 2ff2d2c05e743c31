//! Sub-mesh codec.
//!
//! # Layout
//! ```text
//! flags u8, uv_count u8, max_influence u8, vertex_count u32, face_count u32
//! positions       3 × f32                      × vertex_count
//! uvs             2 × f32 × uv_count           × vertex_count
//! [normals]       3 × f32                      × vertex_count
//! [colors]        4 × u8                       × vertex_count
//! [weights]       (bone idx + f32) × influence × vertex_count
//! faces           3 × vertex idx               × face_count
//! material refs   i32                          × uv_count
//! ```
//!
//! Vertex attributes are stored column by column. Decoding reads the columns
//! into [`VertexColumns`] and only then transposes them into [`Vertex`] rows.

use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use log::trace;

use crate::codec::index::IndexWidth;
use crate::codec::read_block;
use crate::error::{FormatError, Result};
use crate::model::{Face, Mesh, MeshFields, SkinWeight, Vertex};

pub const MESH_HEADER_SIZE: usize = 11;

/// Fixed-size prefix of every mesh record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshHeader {
    pub flags: u8,
    pub uv_count: u8,
    pub max_influence: u8,
    pub vertex_count: u32,
    pub face_count: u32,
}

impl MeshHeader {
    /// Reads the prefix and zeroes the counts whose presence bit is clear.
    ///
    /// The stored bytes are ignored in that case; they decide record width, so
    /// this has to happen before any vertex is touched.
    pub fn read<R: Read>(reader: &mut R, fields: MeshFields) -> Result<Self> {
        let mut header = Self {
            flags: reader.read_u8()?,
            uv_count: reader.read_u8()?,
            max_influence: reader.read_u8()?,
            vertex_count: reader.read_u32::<LittleEndian>()?,
            face_count: reader.read_u32::<LittleEndian>()?,
        };
        if !fields.uvs {
            header.uv_count = 0;
        }
        if !fields.weights {
            header.max_influence = 0;
        }
        Ok(header)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.flags)?;
        writer.write_u8(self.uv_count)?;
        writer.write_u8(self.max_influence)?;
        writer.write_u32::<LittleEndian>(self.vertex_count)?;
        writer.write_u32::<LittleEndian>(self.face_count)?;
        Ok(())
    }

    fn for_mesh(mesh: &Mesh, fields: MeshFields) -> Self {
        Self {
            flags: mesh.flags,
            uv_count: if fields.uvs {
                mesh.material_reference_count().min(u8::MAX as usize) as u8
            } else {
                0
            },
            max_influence: if fields.weights {
                mesh.max_skin_influence().min(u8::MAX as usize) as u8
            } else {
                0
            },
            vertex_count: mesh.vertex_count() as u32,
            face_count: mesh.face_count() as u32,
        }
    }
}

pub fn color_to_bytes(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub fn color_from_bytes(bytes: [u8; 4]) -> [f32; 4] {
    bytes.map(|b| f32::from(b) / 255.0)
}

fn read_f32_column<R: Read>(reader: &mut R, len: u64) -> Result<Vec<f32>> {
    let block = read_block(reader, len * 4)?;
    let mut values = vec![0f32; len as usize];
    LittleEndian::read_f32_into(&block, &mut values);
    Ok(values)
}

fn write_f32_column<W: Write>(writer: &mut W, values: &[f32]) -> Result<()> {
    let mut block = vec![0u8; values.len() * 4];
    LittleEndian::write_f32_into(values, &mut block);
    writer.write_all(&block)?;
    Ok(())
}

/// Vertex attributes exactly as laid out on disk, one flat array per attribute.
///
/// Only `read` and `from_vertices` build one, so every array length agrees
/// with the vertex, UV and influence counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexColumns {
    pub(crate) uv_count: usize,
    pub(crate) influence: usize,
    pub(crate) positions: Vec<f32>,
    pub(crate) uvs: Vec<f32>,
    pub(crate) normals: Option<Vec<f32>>,
    pub(crate) colors: Option<Vec<u8>>,
    pub(crate) weight_bones: Vec<u32>,
    pub(crate) weight_values: Vec<f32>,
}

impl VertexColumns {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn read<R: Read>(
        reader: &mut R,
        header: &MeshHeader,
        fields: MeshFields,
        bone_width: IndexWidth,
    ) -> Result<Self> {
        let n = u64::from(header.vertex_count);
        let uv_count = usize::from(header.uv_count);
        let influence = usize::from(header.max_influence);

        let positions = read_f32_column(reader, 3 * n)?;
        let uvs = read_f32_column(reader, 2 * uv_count as u64 * n)?;
        let normals = if fields.normals {
            Some(read_f32_column(reader, 3 * n)?)
        } else {
            None
        };
        let colors = if fields.colors {
            Some(read_block(reader, 4 * n)?)
        } else {
            None
        };

        let slot = bone_width.size() + 4;
        let block = read_block(reader, (slot * influence) as u64 * n)?;
        let mut weight_bones = Vec::with_capacity(block.len() / slot);
        let mut weight_values = Vec::with_capacity(block.len() / slot);
        for chunk in block.chunks_exact(slot) {
            weight_bones.push(bone_width.decode(chunk));
            weight_values.push(LittleEndian::read_f32(&chunk[bone_width.size()..]));
        }

        Ok(Self {
            uv_count,
            influence,
            positions,
            uvs,
            normals,
            colors,
            weight_bones,
            weight_values,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W, bone_width: IndexWidth) -> Result<()> {
        write_f32_column(writer, &self.positions)?;
        write_f32_column(writer, &self.uvs)?;
        if let Some(normals) = &self.normals {
            write_f32_column(writer, normals)?;
        }
        if let Some(colors) = &self.colors {
            writer.write_all(colors)?;
        }
        for (&bone, &weight) in self.weight_bones.iter().zip(&self.weight_values) {
            bone_width.write(writer, bone)?;
            writer.write_f32::<LittleEndian>(weight)?;
        }
        Ok(())
    }

    /// Scatters rows into columns, padding short UV or weight lists.
    pub fn from_vertices(
        vertices: &[Vertex],
        uv_count: usize,
        influence: usize,
        fields: MeshFields,
    ) -> Self {
        let n = vertices.len();
        let mut columns = Self {
            uv_count,
            influence,
            positions: Vec::with_capacity(3 * n),
            uvs: Vec::with_capacity(2 * uv_count * n),
            normals: fields.normals.then(|| Vec::with_capacity(3 * n)),
            colors: fields.colors.then(|| Vec::with_capacity(4 * n)),
            weight_bones: Vec::with_capacity(influence * n),
            weight_values: Vec::with_capacity(influence * n),
        };

        for v in vertices {
            columns.positions.extend_from_slice(&v.position);
            for layer in 0..uv_count {
                let uv = v.uv_layers.get(layer).copied().unwrap_or([0.0, 0.0]);
                columns.uvs.extend_from_slice(&uv);
            }
            if let Some(normals) = &mut columns.normals {
                normals.extend_from_slice(&v.normal());
            }
            if let Some(colors) = &mut columns.colors {
                colors.extend_from_slice(&color_to_bytes(v.color()));
            }
            for slot in 0..influence {
                let w = v.weights.get(slot).copied().unwrap_or_default();
                columns.weight_bones.push(w.bone);
                columns.weight_values.push(w.weight);
            }
        }

        columns
    }

    /// Gathers columns back into rows.
    ///
    /// A nonzero weight must point at a bone below `bone_count`; zero-weight
    /// slots are padding and are kept as read.
    pub fn into_vertices(self, bone_count: u32) -> Result<Vec<Vertex>> {
        let n = self.vertex_count();
        let mut vertices = Vec::with_capacity(n);

        for i in 0..n {
            let p = &self.positions[i * 3..i * 3 + 3];
            let mut v = Vertex::at([p[0], p[1], p[2]]);

            let uvs = &self.uvs[i * 2 * self.uv_count..(i + 1) * 2 * self.uv_count];
            v.uv_layers = uvs.chunks_exact(2).map(|uv| [uv[0], uv[1]]).collect();

            if let Some(normals) = &self.normals {
                let nrm = &normals[i * 3..i * 3 + 3];
                v.normal = Some([nrm[0], nrm[1], nrm[2]]);
            }
            if let Some(colors) = &self.colors {
                let c = &colors[i * 4..i * 4 + 4];
                v.color = Some(color_from_bytes([c[0], c[1], c[2], c[3]]));
            }

            let range = i * self.influence..(i + 1) * self.influence;
            for (&bone, &weight) in self.weight_bones[range.clone()]
                .iter()
                .zip(&self.weight_values[range])
            {
                if weight != 0.0 && bone >= bone_count {
                    return Err(FormatError::out_of_range(
                        "weight bone",
                        bone,
                        bone_count as usize,
                    ));
                }
                v.weights.push(SkinWeight { bone, weight });
            }

            vertices.push(v);
        }

        Ok(vertices)
    }
}

pub fn read_faces<R: Read>(reader: &mut R, face_count: u32, vertex_count: u32) -> Result<Vec<Face>> {
    let width = IndexWidth::for_count(vertex_count);
    let block = read_block(reader, 3 * width.size() as u64 * u64::from(face_count))?;

    let mut faces = Vec::with_capacity(face_count as usize);
    for tri in block.chunks_exact(3 * width.size()) {
        let mut indices = [0u32; 3];
        for (k, raw) in tri.chunks_exact(width.size()).enumerate() {
            let index = width.decode(raw);
            if index >= vertex_count {
                return Err(FormatError::out_of_range(
                    "face vertex",
                    index,
                    vertex_count as usize,
                ));
            }
            indices[k] = index;
        }
        faces.push(Face { indices });
    }
    Ok(faces)
}

pub fn write_faces<W: Write>(writer: &mut W, faces: &[Face], vertex_count: u32) -> Result<()> {
    let width = IndexWidth::for_count(vertex_count);
    for face in faces {
        for &index in &face.indices {
            width.write(writer, index)?;
        }
    }
    Ok(())
}

/// Decodes one mesh. `bone_width` and `bone_count` come from the model header.
pub fn read_mesh<R: Read>(
    reader: &mut R,
    fields: MeshFields,
    bone_width: IndexWidth,
    bone_count: u32,
) -> Result<Mesh> {
    let header = MeshHeader::read(reader, fields)?;
    trace!(
        "mesh: {} vertices, {} faces, {} uv layers, {} influences",
        header.vertex_count, header.face_count, header.uv_count, header.max_influence
    );

    let columns = VertexColumns::read(reader, &header, fields, bone_width)?;
    let faces = read_faces(reader, header.face_count, header.vertex_count)?;

    let mut material_references = vec![0i32; usize::from(header.uv_count)];
    reader.read_i32_into::<LittleEndian>(&mut material_references)?;

    Ok(Mesh {
        flags: header.flags,
        vertices: columns.into_vertices(bone_count)?,
        faces,
        material_references,
    })
}

pub fn write_mesh<W: Write>(
    writer: &mut W,
    mesh: &Mesh,
    fields: MeshFields,
    bone_width: IndexWidth,
) -> Result<()> {
    let header = MeshHeader::for_mesh(mesh, fields);
    header.write(writer)?;

    let columns = VertexColumns::from_vertices(
        &mesh.vertices,
        usize::from(header.uv_count),
        usize::from(header.max_influence),
        fields,
    );
    columns.write(writer, bone_width)?;

    write_faces(writer, &mesh.faces, header.vertex_count)?;

    for slot in 0..usize::from(header.uv_count) {
        let reference = mesh.material_references.get(slot).copied().unwrap_or(-1);
        writer.write_i32::<LittleEndian>(reference)?;
    }
    Ok(())
}
