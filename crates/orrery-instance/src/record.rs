//! The packed per-instance record shared by the ring and body streams.

use bytemuck::{Pod, Zeroable};

/// Number of f32 values per instance record: 16 for the matrix, 3 for color.
pub const FLOATS_PER_INSTANCE: usize = 19;

/// Per-instance stride in bytes as seen by the GPU vertex fetcher.
pub const INSTANCE_STRIDE_BYTES: u64 = (FLOATS_PER_INSTANCE * 4) as u64;

/// One body's (or ring's) worth of render data for an instanced draw.
///
/// The layout is a wire contract with the vertex shaders: a column-major
/// 4x4 transform in bytes [0, 64) followed by an RGB color in [64, 76).
/// A 4x4 matrix occupies four consecutive attribute locations, one per
/// column.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major model transform, scale included.
    pub transform: [[f32; 4]; 4],
    /// Linear RGB color, unclamped.
    pub color: [f32; 3],
}

impl RenderInstance {
    /// Instanced vertex buffer layout for this record.
    ///
    /// Location 0 is reserved for the per-vertex position of the bound
    /// geometry; locations 1-4 carry the matrix columns and location 5 the
    /// color. Both the ring and body pipelines bind this exact layout so a
    /// single attribute configuration serves both streams.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: INSTANCE_STRIDE_BYTES,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 3,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 48,
                shader_location: 4,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 64,
                shader_location: 5,
            },
        ],
    };

    /// Build a record from a glam matrix and a color.
    pub fn new(transform: glam::Mat4, color: [f32; 3]) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            color,
        }
    }

    /// The translation column of the transform.
    pub fn translation(&self) -> glam::Vec3 {
        glam::Vec3::from_slice(&self.transform[3][..3])
    }
}

/// View a record slice as the flat f32 buffer uploaded to the GPU.
pub fn as_floats(instances: &[RenderInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}
