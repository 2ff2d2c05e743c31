use std::io::Write;
use std::time::Instant;

use log::{debug, info};

use crate::codec::bone::write_bones;
use crate::codec::header::{write_header, write_info};
use crate::codec::index::IndexWidth;
use crate::codec::material::write_material;
use crate::codec::mesh::write_mesh;
use crate::error::Result;
use crate::model::{Header, HeaderFlags, Info, Model};

/// Header for `model` as it stands right now.
pub fn derive_header(model: &Model, flags: &HeaderFlags) -> Header {
    Header {
        data_presence: flags.data,
        bone_presence: flags.bone.to_bits(),
        mesh_presence: flags.mesh.to_bits(),
        bone_count: model.bones.len() as u32,
        mesh_count: model.meshes.len() as u32,
        material_count: model.materials.len() as u32,
    }
}

/// Encodes `model`. Presence flags and counts are recomputed from the tables;
/// `model.header` is not consulted.
pub fn write_model<W: Write>(model: &Model, writer: &mut W) -> Result<()> {
    let started = Instant::now();

    let flags = HeaderFlags::from_model(model);
    let header = derive_header(model, &flags);
    debug!(
        "Saving SEModel: {} bones, {} meshes, {} materials (flags {:#04x}/{:#04x}/{:#04x})",
        header.bone_count,
        header.mesh_count,
        header.material_count,
        header.data_presence,
        header.bone_presence,
        header.mesh_presence
    );

    write_info(writer, &Info::default())?;
    write_header(writer, &header)?;

    write_bones(writer, &model.bones, flags.bone)?;

    let bone_width = IndexWidth::for_count(header.bone_count);
    for mesh in &model.meshes {
        write_mesh(writer, mesh, flags.mesh, bone_width)?;
    }

    for material in &model.materials {
        write_material(writer, material)?;
    }

    info!("SEModel saved in {:?}", started.elapsed());
    Ok(())
}
