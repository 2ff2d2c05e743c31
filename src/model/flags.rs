use serde::{Deserialize, Serialize};

use super::Model;

/// A single bit of one of the three header presence masks.
pub trait PresenceFlag: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn bit(self) -> u8;

    fn name(self) -> &'static str;

    fn is_set(self, bits: u8) -> bool {
        bits & self.bit() != 0
    }

    /// Get all flags present in the bitfield
    fn from_bits(bits: u8) -> Vec<Self> {
        Self::ALL.iter().copied().filter(|f| f.is_set(bits)).collect()
    }

    /// Convert array of flags back to bitfield
    fn to_bits(flags: &[Self]) -> u8 {
        flags.iter().fold(0u8, |bits, f| bits | f.bit())
    }
}

/// Model-level presence: which top-level tables follow the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataPresence {
    Bones = 0x1,
    Meshes = 0x2,
    Materials = 0x4,
    /// Never written; no payload is defined for it.
    Custom = 0x80,
}

impl PresenceFlag for DataPresence {
    const ALL: &'static [Self] = &[Self::Bones, Self::Meshes, Self::Materials, Self::Custom];

    fn bit(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::Bones => "Bones",
            Self::Meshes => "Meshes",
            Self::Materials => "Materials",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonePresence {
    GlobalMatrix = 0x1,
    LocalMatrix = 0x2,
    Scales = 0x4,
}

impl PresenceFlag for BonePresence {
    const ALL: &'static [Self] = &[Self::GlobalMatrix, Self::LocalMatrix, Self::Scales];

    fn bit(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::GlobalMatrix => "GlobalMatrix",
            Self::LocalMatrix => "LocalMatrix",
            Self::Scales => "Scales",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshPresence {
    UvSet = 0x1,
    Normals = 0x2,
    Colors = 0x4,
    Weights = 0x8,
}

impl PresenceFlag for MeshPresence {
    const ALL: &'static [Self] = &[Self::UvSet, Self::Normals, Self::Colors, Self::Weights];

    fn bit(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::UvSet => "UvSet",
            Self::Normals => "Normals",
            Self::Colors => "Colors",
            Self::Weights => "Weights",
        }
    }
}

/// Optional bone fields carried by every record of a bone table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoneFields {
    pub global: bool,
    pub local: bool,
    pub scale: bool,
}

impl BoneFields {
    pub fn from_bits(bits: u8) -> Self {
        Self {
            global: BonePresence::GlobalMatrix.is_set(bits),
            local: BonePresence::LocalMatrix.is_set(bits),
            scale: BonePresence::Scales.is_set(bits),
        }
    }

    pub fn to_bits(self) -> u8 {
        let mut flags = Vec::new();
        if self.global {
            flags.push(BonePresence::GlobalMatrix);
        }
        if self.local {
            flags.push(BonePresence::LocalMatrix);
        }
        if self.scale {
            flags.push(BonePresence::Scales);
        }
        BonePresence::to_bits(&flags)
    }
}

/// Optional vertex attributes shared by every mesh of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshFields {
    pub uvs: bool,
    pub normals: bool,
    pub colors: bool,
    pub weights: bool,
}

impl MeshFields {
    pub fn from_bits(bits: u8) -> Self {
        Self {
            uvs: MeshPresence::UvSet.is_set(bits),
            normals: MeshPresence::Normals.is_set(bits),
            colors: MeshPresence::Colors.is_set(bits),
            weights: MeshPresence::Weights.is_set(bits),
        }
    }

    pub fn to_bits(self) -> u8 {
        let mut flags = Vec::new();
        if self.uvs {
            flags.push(MeshPresence::UvSet);
        }
        if self.normals {
            flags.push(MeshPresence::Normals);
        }
        if self.colors {
            flags.push(MeshPresence::Colors);
        }
        if self.weights {
            flags.push(MeshPresence::Weights);
        }
        MeshPresence::to_bits(&flags)
    }
}

/// Presence masks derived from the live tables right before a save.
///
/// This is a projection of the model; it is never read back into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderFlags {
    pub data: u8,
    pub bone: BoneFields,
    pub mesh: MeshFields,
}

impl HeaderFlags {
    pub fn from_model(model: &Model) -> Self {
        let mut data = Vec::new();
        if !model.bones.is_empty() {
            data.push(DataPresence::Bones);
        }
        if !model.meshes.is_empty() {
            data.push(DataPresence::Meshes);
        }
        if !model.materials.is_empty() {
            data.push(DataPresence::Materials);
        }

        let bone = model.bones.iter().fold(BoneFields::default(), |acc, b| BoneFields {
            global: acc.global || b.global.is_some(),
            local: acc.local || b.local.is_some(),
            scale: acc.scale || b.scale.is_some(),
        });

        let mut mesh = MeshFields::default();
        for m in &model.meshes {
            mesh.uvs |= m.material_reference_count() > 0;
            mesh.weights |= m.max_skin_influence() > 0;
            for v in &m.vertices {
                mesh.normals |= v.normal.is_some();
                mesh.colors |= v.color.is_some();
            }
        }

        Self {
            data: DataPresence::to_bits(&data),
            bone,
            mesh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bone, Mesh, Transform, Vertex};

    #[test]
    fn test_flag_bits_roundtrip() {
        let flags = MeshPresence::from_bits(0b1010);
        assert_eq!(flags, vec![MeshPresence::Normals, MeshPresence::Weights]);
        assert_eq!(MeshPresence::to_bits(&flags), 0b1010);
        assert_eq!(DataPresence::from_bits(0x80), vec![DataPresence::Custom]);
    }

    #[test]
    fn test_fields_from_bits() {
        let fields = BoneFields::from_bits(0b101);
        assert!(fields.global);
        assert!(!fields.local);
        assert!(fields.scale);
        assert_eq!(fields.to_bits(), 0b101);

        let mesh = MeshFields::from_bits(0xF0);
        assert_eq!(mesh, MeshFields::default());
    }

    #[test]
    fn test_empty_model_has_no_flags() {
        let flags = HeaderFlags::from_model(&Model::default());
        assert_eq!(flags, HeaderFlags::default());
    }

    #[test]
    fn test_flags_are_union_over_tables() {
        let mut model = Model::default();
        model.bones.push(Bone::new("root", -1));
        let mut child = Bone::new("child", 0);
        child.local = Some(Transform::default());
        model.bones.push(child);

        let mut mesh = Mesh::default();
        mesh.vertices.push(Vertex::at([0.0, 0.0, 0.0]));
        let mut colored = Vertex::at([1.0, 0.0, 0.0]);
        colored.color = Some([1.0, 0.0, 0.0, 1.0]);
        mesh.vertices.push(colored);
        model.meshes.push(mesh);

        let flags = HeaderFlags::from_model(&model);
        assert_eq!(flags.data, 0b011);
        assert_eq!(flags.bone, BoneFields { global: false, local: true, scale: false });
        assert_eq!(
            flags.mesh,
            MeshFields { uvs: false, normals: false, colors: true, weights: false }
        );
    }
}
