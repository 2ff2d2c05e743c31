use serde::{Deserialize, Serialize};

pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinWeight {
    pub bone: u32,
    pub weight: f32,
}

impl SkinWeight {
    pub fn new(bone: u32, weight: f32) -> Self {
        Self { bone, weight }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: Option<[f32; 3]>,
    /// RGBA in 0..=1; stored on disk as 8 bits per channel.
    pub color: Option<[f32; 4]>,
    pub uv_layers: Vec<[f32; 2]>,
    pub weights: Vec<SkinWeight>,
}

impl Vertex {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn normal(&self) -> [f32; 3] {
        self.normal.unwrap_or(DEFAULT_NORMAL)
    }

    pub fn color(&self) -> [f32; 4] {
        self.color.unwrap_or(DEFAULT_COLOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: [u32; 3],
}

impl Default for Face {
    fn default() -> Self {
        Self { indices: [0, 1, 2] }
    }
}

impl Face {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }

    /// Two corners share a vertex, so the triangle has no area.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.indices;
        a == b || a == c || b == c
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub flags: u8,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    /// One entry per UV layer; -1 means no material.
    pub material_references: Vec<i32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of UV layers, which is also the number of material slots.
    pub fn material_reference_count(&self) -> usize {
        let uv_layers = self.vertices.iter().map(|v| v.uv_layers.len()).max().unwrap_or(0);
        uv_layers.max(self.material_references.len())
    }

    pub fn max_skin_influence(&self) -> usize {
        self.vertices.iter().map(|v| v.weights.len()).max().unwrap_or(0)
    }

    /// Indices of faces that reference the same vertex twice.
    pub fn degenerate_faces(&self) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_degenerate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Drops degenerate faces in place and returns how many were removed.
    ///
    /// Loading never does this on its own, so `face_count` after a load always
    /// matches the file.
    pub fn remove_degenerate_faces(&mut self) -> usize {
        let before = self.faces.len();
        self.faces.retain(|f| !f.is_degenerate());
        before - self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_defaults() {
        let v = Vertex::at([1.0, 2.0, 3.0]);
        assert_eq!(v.normal(), [0.0, 0.0, 1.0]);
        assert_eq!(v.color(), [1.0, 1.0, 1.0, 1.0]);
        assert!(v.uv_layers.is_empty());
        assert!(v.weights.is_empty());
    }

    #[test]
    fn test_reference_count_covers_uvs_and_materials() {
        let mut mesh = Mesh::default();
        let mut v = Vertex::at([0.0; 3]);
        v.uv_layers = vec![[0.0, 0.0]; 2];
        mesh.vertices.push(v);
        assert_eq!(mesh.material_reference_count(), 2);

        mesh.material_references = vec![0, 1, -1];
        assert_eq!(mesh.material_reference_count(), 3);
    }

    #[test]
    fn test_max_skin_influence() {
        let mut mesh = Mesh::default();
        let mut a = Vertex::at([0.0; 3]);
        a.weights = vec![SkinWeight::new(0, 1.0)];
        let mut b = Vertex::at([0.0; 3]);
        b.weights = vec![SkinWeight::new(0, 0.5), SkinWeight::new(1, 0.5)];
        mesh.vertices.extend([a, b, Vertex::at([0.0; 3])]);
        assert_eq!(mesh.max_skin_influence(), 2);
    }

    #[test]
    fn test_remove_degenerate_faces() {
        let mut mesh = Mesh::default();
        mesh.faces = vec![
            Face::new(0, 1, 2),
            Face::new(1, 1, 2),
            Face::new(2, 3, 2),
            Face::new(4, 5, 4),
            Face::new(3, 4, 5),
        ];
        assert_eq!(mesh.degenerate_faces(), vec![1, 2, 3]);
        assert_eq!(mesh.remove_degenerate_faces(), 3);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2), Face::new(3, 4, 5)]);
    }
}
