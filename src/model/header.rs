use serde::{Deserialize, Serialize};

use super::flags::{BoneFields, DataPresence, MeshFields, PresenceFlag};

pub const MAGIC: &[u8; 7] = b"SEModel";
pub const VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub magic: [u8; 7],
    pub version: u16,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
        }
    }
}

/// Header as found on disk. Decoding fills it; saving derives a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub data_presence: u8,
    pub bone_presence: u8,
    pub mesh_presence: u8,
    pub bone_count: u32,
    pub mesh_count: u32,
    pub material_count: u32,
}

impl Header {
    pub fn has(&self, flag: DataPresence) -> bool {
        flag.is_set(self.data_presence)
    }

    pub fn has_custom_block(&self) -> bool {
        self.has(DataPresence::Custom)
    }

    pub fn bone_fields(&self) -> BoneFields {
        BoneFields::from_bits(self.bone_presence)
    }

    pub fn mesh_fields(&self) -> MeshFields {
        MeshFields::from_bits(self.mesh_presence)
    }
}
