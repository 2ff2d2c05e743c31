use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleMaterialData {
    pub diffuse_map: String,
    pub normal_map: String,
    pub specular_map: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialData {
    Simple(SimpleMaterialData),
    /// Opaque placeholder; the format defines no payload for it yet.
    Complex,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self::Simple(SimpleMaterialData::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub data: MaterialData,
}

impl Material {
    pub fn simple(
        name: impl Into<String>,
        diffuse_map: impl Into<String>,
        normal_map: impl Into<String>,
        specular_map: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data: MaterialData::Simple(SimpleMaterialData {
                diffuse_map: diffuse_map.into(),
                normal_map: normal_map.into(),
                specular_map: specular_map.into(),
            }),
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self.data, MaterialData::Simple(_))
    }

    pub fn simple_data(&self) -> Option<&SimpleMaterialData> {
        match &self.data {
            MaterialData::Simple(data) => Some(data),
            MaterialData::Complex => None,
        }
    }
}
