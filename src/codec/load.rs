use std::io::Read;
use std::time::Instant;

use log::{debug, info};

use crate::codec::bone::read_bones;
use crate::codec::header::{read_header, read_info};
use crate::codec::index::IndexWidth;
use crate::codec::material::read_material;
use crate::codec::mesh::read_mesh;
use crate::error::Result;
use crate::model::{DataPresence, Model};

/// Decodes a whole model. Any error aborts; nothing partial is returned.
pub fn read_model<R: Read>(reader: &mut R) -> Result<Model> {
    let started = Instant::now();

    let info = read_info(reader)?;
    let header = read_header(reader)?;
    debug!(
        "SEModel header: {} bones, {} meshes, {} materials (flags {:#04x}/{:#04x}/{:#04x})",
        header.bone_count,
        header.mesh_count,
        header.material_count,
        header.data_presence,
        header.bone_presence,
        header.mesh_presence
    );
    if header.has_custom_block() {
        debug!("custom block flag set; its payload is not read");
    }

    // Weight indices are sized by the declared bone count, even when the
    // bone table itself is absent.
    let bone_width = IndexWidth::for_count(header.bone_count);

    let bones = if header.has(DataPresence::Bones) {
        read_bones(reader, header.bone_count, header.bone_fields())?
    } else {
        Vec::new()
    };
    debug!("Loaded {} bones", bones.len());

    let mut meshes = Vec::new();
    if header.has(DataPresence::Meshes) {
        let fields = header.mesh_fields();
        for _ in 0..header.mesh_count {
            meshes.push(read_mesh(reader, fields, bone_width, header.bone_count)?);
        }
    }
    debug!("Loaded {} meshes", meshes.len());

    let mut materials = Vec::new();
    if header.has(DataPresence::Materials) {
        for _ in 0..header.material_count {
            materials.push(read_material(reader)?);
        }
    }
    debug!("Loaded {} materials", materials.len());

    info!("SEModel loaded in {:?}", started.elapsed());

    Ok(Model {
        info,
        header,
        bones,
        meshes,
        materials,
    })
}
