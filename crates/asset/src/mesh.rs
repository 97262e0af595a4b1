//! CPU-side mesh representation.

/// Vertex with position/normal/uv in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle list, counter-clockwise front faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub label: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(label: impl Into<String>, vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self {
            label: label.into(),
            vertices,
            indices,
        }
    }

    /// Non-empty, whole triangles, every index in range.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position,
                self.vertices[tri[1] as usize].position,
                self.vertices[tri[2] as usize].position,
            ]
        })
    }
}
