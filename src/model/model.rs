use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Result;
use crate::model::header::{Header, Info};
use crate::model::material::Material;
use crate::model::mesh::Mesh;
use crate::model::skeleton::Bone;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub info: Info,
    /// Header decoded by the last load. `save` derives its own.
    pub header: Header,
    pub bones: Vec<Bone>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

impl Model {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::read_from(&mut BufReader::new(file))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        codec::load::read_model(reader)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::save::write_model(self, writer)
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.parent_index() == Some(index))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bone_lookup() {
        let mut model = Model::default();
        model.bones.push(Bone::new("tag_origin", -1));
        model.bones.push(Bone::new("j_spine", 0));
        model.bones.push(Bone::new("j_head", 1));
        model.bones.push(Bone::new("j_gun", 0));

        assert_eq!(model.bone_index("j_head"), Some(2));
        assert_eq!(model.bone_index("missing"), None);
        assert_eq!(model.children_of(0).collect::<Vec<_>>(), vec![1, 3]);
        assert!(model.bones[0].is_root());
    }
}
