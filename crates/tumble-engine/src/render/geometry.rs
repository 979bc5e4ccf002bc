use bytemuck::{Pod, Zeroable};

/// Object-space vertex position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: [x, y, z] }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Immutable geometry descriptor: positions plus an optional index list.
///
/// Indices, when present, group vertices into triangles (three per triangle).
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    label: &'static str,
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
}

impl Geometry {
    /// Non-indexed triangle list.
    pub fn triangle_list(label: &'static str, vertices: &[Vertex]) -> Self {
        debug_assert!(vertices.len() % 3 == 0, "{label}: vertex count not a multiple of 3");
        Self {
            label,
            vertices: vertices.to_vec(),
            indices: None,
        }
    }

    /// Indexed triangle list.
    pub fn indexed(label: &'static str, vertices: &[Vertex], indices: &[u32]) -> Self {
        debug_assert!(indices.len() % 3 == 0, "{label}: index count not a multiple of 3");
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "{label}: index out of range"
        );
        Self {
            label,
            vertices: vertices.to_vec(),
            indices: Some(indices.to_vec()),
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.as_ref().map_or(0, |i| i.len() as u32)
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }
}

/// Handle to geometry uploaded into a `ShapeRenderer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GeometryId(pub(crate) u32);

impl GeometryId {
    /// Builds a handle from a raw slot number.
    ///
    /// Mainly useful for driving a `FrameList` without a live renderer.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: [Vertex; 4] = [
        Vertex::new(-1.0, 1.0, 0.0),
        Vertex::new(1.0, 1.0, 0.0),
        Vertex::new(1.0, -1.0, 0.0),
        Vertex::new(-1.0, -1.0, 0.0),
    ];

    #[test]
    fn vertex_is_three_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD);
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn indexed_geometry_counts() {
        let g = Geometry::indexed("quad", &QUAD, &[0, 1, 2, 0, 2, 3]);
        assert!(g.is_indexed());
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.index_count(), 6);
    }

    #[test]
    fn plain_geometry_has_no_indices() {
        let g = Geometry::triangle_list("tri", &QUAD[..3]);
        assert!(!g.is_indexed());
        assert_eq!(g.indices(), None);
        assert_eq!(g.index_count(), 0);
        assert_eq!(g.vertex_count(), 3);
    }
}
