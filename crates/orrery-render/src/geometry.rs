//! Static geometry for the two instance streams: a unit circle for orbit
//! rings and a unit UV sphere for body markers.

use bytemuck::{Pod, Zeroable};

/// Position-only vertex used by both geometries.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GeometryVertex {
    pub position: [f32; 3],
}

impl GeometryVertex {
    /// Per-vertex buffer layout, position at shader location 0.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GeometryVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    };
}

/// Unit circle in the XZ plane, closed for a line-strip draw.
///
/// The first vertex is repeated at the end because wgpu has no line-loop
/// topology, so the returned vector holds `segments + 1` vertices.
pub fn ring_vertices(segments: u32) -> Vec<GeometryVertex> {
    let mut vertices = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let angle = (i % segments) as f32 / segments as f32 * std::f32::consts::TAU;
        vertices.push(GeometryVertex {
            position: [angle.cos(), 0.0, angle.sin()],
        });
    }
    vertices
}

/// Unit UV sphere: positions on the unit sphere plus triangle-list u16
/// indices. Pole caps are fans; the bands in between are split quads.
///
/// Because every position lies on the unit sphere, the shader recovers the
/// surface normal by normalizing the transformed position direction.
pub fn unit_sphere(stacks: u32, slices: u32) -> (Vec<GeometryVertex>, Vec<u16>) {
    assert!(stacks >= 2 && slices >= 3, "sphere too coarse to close");

    let mut vertices = Vec::new();
    vertices.push(GeometryVertex {
        position: [0.0, -1.0, 0.0],
    });
    for stack in 1..stacks {
        let phi = stack as f32 / stacks as f32 * std::f32::consts::PI - std::f32::consts::FRAC_PI_2;
        for slice in 0..slices {
            let theta = slice as f32 / slices as f32 * std::f32::consts::TAU;
            vertices.push(GeometryVertex {
                position: [
                    theta.cos() * phi.cos(),
                    phi.sin(),
                    theta.sin() * phi.cos(),
                ],
            });
        }
    }
    vertices.push(GeometryVertex {
        position: [0.0, 1.0, 0.0],
    });

    let ring_start = |stack: u32| 1 + (stack - 1) * slices;
    let mut indices: Vec<u16> = Vec::new();

    // South cap fan around vertex 0.
    for slice in 0..slices {
        let next = (slice + 1) % slices;
        indices.extend_from_slice(&[
            0,
            (ring_start(1) + next) as u16,
            (ring_start(1) + slice) as u16,
        ]);
    }

    // Quad bands between consecutive rings.
    for stack in 1..stacks - 1 {
        let lower = ring_start(stack);
        let upper = ring_start(stack + 1);
        for slice in 0..slices {
            let next = (slice + 1) % slices;
            indices.extend_from_slice(&[
                (lower + slice) as u16,
                (lower + next) as u16,
                (upper + slice) as u16,
            ]);
            indices.extend_from_slice(&[
                (upper + slice) as u16,
                (lower + next) as u16,
                (upper + next) as u16,
            ]);
        }
    }

    // North cap fan around the last vertex.
    let north = (vertices.len() - 1) as u16;
    let top_ring = ring_start(stacks - 1);
    for slice in 0..slices {
        let next = (slice + 1) % slices;
        indices.extend_from_slice(&[
            north,
            (top_ring + next) as u16,
            (top_ring + slice) as u16,
        ]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_position_only() {
        let layout = GeometryVertex::LAYOUT;
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn test_ring_closes_on_itself() {
        let ring = ring_vertices(60);
        assert_eq!(ring.len(), 61);
        assert_eq!(ring.first().unwrap().position, ring.last().unwrap().position);
    }

    #[test]
    fn test_ring_lies_in_xz_plane_on_unit_circle() {
        for v in ring_vertices(60) {
            let [x, y, z] = v.position;
            assert_eq!(y, 0.0);
            let r = (x * x + z * z).sqrt();
            assert!((r - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_vertices_are_unit_length() {
        let (vertices, _) = unit_sphere(10, 20);
        for v in &vertices {
            let [x, y, z] = v.position;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "vertex off the sphere: {len}");
        }
    }

    #[test]
    fn test_sphere_vertex_and_index_counts() {
        let (stacks, slices) = (10u32, 20u32);
        let (vertices, indices) = unit_sphere(stacks, slices);
        // Poles plus (stacks - 1) rings of `slices` vertices.
        assert_eq!(vertices.len() as u32, 2 + (stacks - 1) * slices);
        // Two cap fans plus (stacks - 2) bands of two triangles per quad.
        let expected_tris = 2 * slices + (stacks - 2) * slices * 2;
        assert_eq!(indices.len() as u32, expected_tris * 3);
    }

    #[test]
    fn test_sphere_indices_stay_in_bounds() {
        let (vertices, indices) = unit_sphere(10, 20);
        let max = *indices.iter().max().unwrap() as usize;
        assert!(max < vertices.len());
    }

    #[test]
    #[should_panic(expected = "too coarse")]
    fn test_degenerate_sphere_is_rejected() {
        unit_sphere(1, 2);
    }
}
