use serde::{Deserialize, Serialize};

pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
pub const IDENTITY_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const DEFAULT_SCALE: [f32; 3] = [1.0, 1.0, 1.0];

/// Position plus rotation quaternion (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            rotation: IDENTITY_ROTATION,
        }
    }
}

impl Transform {
    pub fn new(position: [f32; 3], rotation: [f32; 4]) -> Self {
        Self { position, rotation }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    pub flags: u8,
    pub parent: i32, // -1 means root
    pub global: Option<Transform>,
    pub local: Option<Transform>,
    pub scale: Option<[f32; 3]>,
}

impl Default for Bone {
    fn default() -> Self {
        Self {
            name: String::new(),
            flags: 0,
            parent: -1,
            global: None,
            local: None,
            scale: None,
        }
    }
}

impl Bone {
    pub fn new(name: impl Into<String>, parent: i32) -> Self {
        Self {
            name: name.into(),
            parent,
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent < 0
    }

    pub fn parent_index(&self) -> Option<usize> {
        usize::try_from(self.parent).ok()
    }

    pub fn global_position(&self) -> [f32; 3] {
        self.global.map_or(DEFAULT_POSITION, |t| t.position)
    }

    pub fn global_rotation(&self) -> [f32; 4] {
        self.global.map_or(IDENTITY_ROTATION, |t| t.rotation)
    }

    pub fn local_position(&self) -> [f32; 3] {
        self.local.map_or(DEFAULT_POSITION, |t| t.position)
    }

    pub fn local_rotation(&self) -> [f32; 4] {
        self.local.map_or(IDENTITY_ROTATION, |t| t.rotation)
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale.unwrap_or(DEFAULT_SCALE)
    }
}
