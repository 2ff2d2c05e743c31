use anyhow::{Context, bail};
use semodel::settings::InspectSettings;
use semodel::{BonePresence, DataPresence, MeshPresence, Model, PresenceFlag};
use serde::Serialize;

#[derive(Serialize)]
struct MeshSummary {
    vertices: usize,
    faces: usize,
    degenerate_faces: usize,
    uv_layers: usize,
    max_skin_influence: usize,
    material_references: Vec<i32>,
}

#[derive(Serialize)]
struct ModelSummary {
    version: u16,
    data: Vec<&'static str>,
    bone_fields: Vec<&'static str>,
    mesh_fields: Vec<&'static str>,
    bones: usize,
    root_bones: Vec<String>,
    meshes: Vec<MeshSummary>,
    materials: Vec<String>,
}

fn names<F: PresenceFlag>(bits: u8) -> Vec<&'static str> {
    F::from_bits(bits).into_iter().map(|f| f.name()).collect()
}

fn summarize(model: &Model) -> ModelSummary {
    ModelSummary {
        version: model.info.version,
        data: names::<DataPresence>(model.header.data_presence),
        bone_fields: names::<BonePresence>(model.header.bone_presence),
        mesh_fields: names::<MeshPresence>(model.header.mesh_presence),
        bones: model.bones.len(),
        root_bones: model
            .bones
            .iter()
            .filter(|b| b.is_root())
            .map(|b| b.name.clone())
            .collect(),
        meshes: model
            .meshes
            .iter()
            .map(|m| MeshSummary {
                vertices: m.vertex_count(),
                faces: m.face_count(),
                degenerate_faces: m.degenerate_faces().len(),
                uv_layers: m.material_reference_count(),
                max_skin_influence: m.max_skin_influence(),
                material_references: m.material_references.clone(),
            })
            .collect(),
        materials: model.materials.iter().map(|m| m.name.clone()).collect(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <model.semodel> [resaved.semodel]", args[0]);
    }
    let input = &args[1];
    let output = args.get(2);

    let settings = InspectSettings::load();

    let mut model =
        semodel::load(input).with_context(|| format!("failed to load model '{input}'"))?;

    if settings.strip_degenerate_faces {
        for (i, mesh) in model.meshes.iter_mut().enumerate() {
            let removed = mesh.remove_degenerate_faces();
            if removed > 0 {
                log::info!("mesh {i}: removed {removed} degenerate faces");
            }
        }
    }

    let json = match (settings.full_dump, settings.pretty) {
        (true, true) => serde_json::to_string_pretty(&model)?,
        (true, false) => serde_json::to_string(&model)?,
        (false, true) => serde_json::to_string_pretty(&summarize(&model))?,
        (false, false) => serde_json::to_string(&summarize(&model))?,
    };
    println!("{json}");

    if let Some(path) = output {
        semodel::save(&model, path).with_context(|| format!("failed to save model '{path}'"))?;
        log::info!("wrote {path}");
    }

    Ok(())
}
