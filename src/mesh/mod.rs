//! Instanced mesh data: CPU-side geometry and its GPU-resident form.
//!
//! [`MeshData`] is plain geometry with submesh ranges; [`InstanceMesh`]
//! uploads it once and is then shared by every instance in the flock. The
//! built-in [`butterfly`] generator matches the original system's winged
//! instance mesh; [`quad`] is a minimal stand-in.

use wgpu::util::DeviceExt;

/// Vertex layout shared by all instanced meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex buffer layout for pipeline creation.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2, // uv
                },
            ],
        };
}

/// A contiguous index range drawn as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// First index within the mesh index buffer.
    pub first_index: u32,
    /// Number of indices in this submesh.
    pub index_count: u32,
    /// Value added to each index before vertex lookup.
    pub base_vertex: u32,
}

/// CPU-side mesh geometry with submesh ranges.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Triangle-list indices.
    pub indices: Vec<u32>,
    /// Submesh ranges; submesh 0 is the one the boid renderer draws.
    pub submeshes: Vec<Submesh>,
}

impl MeshData {
    /// Single-submesh mesh covering the whole index list.
    pub fn single(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        let submesh = Submesh {
            first_index: 0,
            index_count: indices.len() as u32,
            base_vertex: 0,
        };
        Self {
            vertices,
            indices,
            submeshes: vec![submesh],
        }
    }

    /// Index count of the given submesh, 0 if out of range.
    pub fn index_count(&self, submesh: usize) -> u32 {
        self.submeshes.get(submesh).map_or(0, |s| s.index_count)
    }
}

/// GPU-resident mesh shared by every instance.
pub struct InstanceMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    submeshes: Vec<Submesh>,
}

impl InstanceMesh {
    /// Upload mesh data to the device.
    pub fn from_data(
        device: &wgpu::Device,
        label: &str,
        data: &MeshData,
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            submeshes: data.submeshes.clone(),
        }
    }

    /// Index count of the given submesh, 0 if out of range.
    pub fn index_count(&self, submesh: usize) -> u32 {
        self.submeshes.get(submesh).map_or(0, |s| s.index_count)
    }

    /// The vertex buffer.
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// The index buffer (`u32` indices).
    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }
}

/// Two-winged butterfly silhouette hinged on the body axis.
///
/// Each wing is a quad in the xz plane; the shader flaps them by rotating
/// around the body (z) axis, using the sign of `position.x` to tell the
/// wings apart. Forward is +z to match the velocity-orientation basis.
pub fn butterfly(wing_span: f32, body_length: f32) -> MeshData {
    let half_span = wing_span * 0.5;
    let half_len = body_length * 0.5;
    let up = [0.0, 1.0, 0.0];

    let vertices = vec![
        // Left wing (negative x), hinge edge on the body axis
        MeshVertex {
            position: [0.0, 0.0, half_len],
            normal: up,
            uv: [0.5, 0.0],
        },
        MeshVertex {
            position: [-half_span, 0.0, half_len * 0.4],
            normal: up,
            uv: [0.0, 0.3],
        },
        MeshVertex {
            position: [-half_span, 0.0, -half_len * 0.6],
            normal: up,
            uv: [0.0, 0.8],
        },
        MeshVertex {
            position: [0.0, 0.0, -half_len],
            normal: up,
            uv: [0.5, 1.0],
        },
        // Right wing (positive x), mirrored
        MeshVertex {
            position: [0.0, 0.0, half_len],
            normal: up,
            uv: [0.5, 0.0],
        },
        MeshVertex {
            position: [half_span, 0.0, half_len * 0.4],
            normal: up,
            uv: [1.0, 0.3],
        },
        MeshVertex {
            position: [half_span, 0.0, -half_len * 0.6],
            normal: up,
            uv: [1.0, 0.8],
        },
        MeshVertex {
            position: [0.0, 0.0, -half_len],
            normal: up,
            uv: [0.5, 1.0],
        },
    ];

    // Both windings per wing so the flap reads from either side
    let indices = vec![
        0, 1, 2, 0, 2, 3, 0, 2, 1, 0, 3, 2, // left
        4, 6, 5, 4, 7, 6, 4, 5, 6, 4, 6, 7, // right
    ];

    MeshData::single(vertices, indices)
}

/// Unit quad in the xz plane, facing +y.
pub fn quad(size: f32) -> MeshData {
    let h = size * 0.5;
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        MeshVertex {
            position: [-h, 0.0, -h],
            normal: up,
            uv: [0.0, 1.0],
        },
        MeshVertex {
            position: [h, 0.0, -h],
            normal: up,
            uv: [1.0, 1.0],
        },
        MeshVertex {
            position: [h, 0.0, h],
            normal: up,
            uv: [1.0, 0.0],
        },
        MeshVertex {
            position: [-h, 0.0, h],
            normal: up,
            uv: [0.0, 0.0],
        },
    ];
    let indices = vec![0, 2, 1, 0, 3, 2];
    MeshData::single(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_covers_whole_index_list() {
        let data = quad(1.0);
        assert_eq!(data.submeshes.len(), 1);
        assert_eq!(data.index_count(0), data.indices.len() as u32);
    }

    #[test]
    fn test_out_of_range_submesh_reports_zero() {
        let data = butterfly(1.0, 1.0);
        assert_eq!(data.index_count(1), 0);
        assert_eq!(data.index_count(usize::MAX), 0);
    }

    #[test]
    fn test_butterfly_indices_reference_valid_vertices() {
        let data = butterfly(2.0, 1.0);
        assert_eq!(data.indices.len() % 3, 0);
        let max = data.indices.iter().max().copied().unwrap_or(0);
        assert!((max as usize) < data.vertices.len());
    }
}
