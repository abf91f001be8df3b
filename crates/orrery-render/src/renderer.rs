//! Per-frame orrery renderer: recompiles both instance streams from the
//! live body tree, re-uploads them in full, and issues the two instanced
//! draws.

use wgpu::util::DeviceExt;

use orrery_instance::{RenderInstance, body_instances, orbit_instances};
use orrery_scene::OrbitingBody;

use crate::camera::Camera;
use crate::geometry::{GeometryVertex, ring_vertices, unit_sphere};
use crate::pipeline::{BodyPipeline, RingPipeline, camera_bind_group_layout};

/// Tunables for the static geometry.
#[derive(Debug, Clone, Copy)]
pub struct RendererSettings {
    /// Line segments per orbit ring.
    pub ring_segments: u32,
    /// Latitude bands of the marker sphere.
    pub sphere_stacks: u32,
    /// Longitude slices of the marker sphere.
    pub sphere_slices: u32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            ring_segments: 60,
            sphere_stacks: 10,
            sphere_slices: 20,
        }
    }
}

impl RendererSettings {
    /// Clamp tessellation into the ranges the geometry builders and the
    /// u16 sphere index format can represent. Settings come from an
    /// editable config file, so out-of-range values are corrected rather
    /// than trusted.
    pub fn sanitized(self) -> Self {
        Self {
            ring_segments: self.ring_segments.clamp(3, 4096),
            sphere_stacks: self.sphere_stacks.clamp(2, 64),
            sphere_slices: self.sphere_slices.clamp(3, 256),
        }
    }
}

/// A growable instance-attribute buffer, re-uploaded in full every frame.
///
/// Every instance changes every tick (phase advances for the whole tree),
/// so there is nothing to gain from partial updates. The buffer only
/// reallocates when the stream outgrows its capacity.
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
    label: &'static str,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(device, label, capacity),
            capacity,
            count: 0,
            label,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<RenderInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[RenderInstance]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!(
                "Instance buffer '{}' grew to {} records",
                self.label,
                self.capacity
            );
        }
        self.count = instances.len() as u32;
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
    }
}

/// Owns the pipelines, static geometry, camera uniform and both instance
/// buffers, and records the two draws into a caller-provided render pass.
pub struct OrreryRenderer {
    ring_pipeline: RingPipeline,
    body_pipeline: BodyPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    ring_vertex_buffer: wgpu::Buffer,
    ring_vertex_count: u32,
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    sphere_index_count: u32,
    orbit_stream: InstanceBuffer,
    body_stream: InstanceBuffer,
}

impl OrreryRenderer {
    /// Create the renderer against the given surface format.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        settings: RendererSettings,
    ) -> Self {
        let requested = settings;
        let settings = settings.sanitized();
        if settings.ring_segments != requested.ring_segments
            || settings.sphere_stacks != requested.sphere_stacks
            || settings.sphere_slices != requested.sphere_slices
        {
            log::warn!(
                "Tessellation settings out of range, clamped to {settings:?}"
            );
        }

        let camera_layout = camera_bind_group_layout(device);
        let ring_pipeline = RingPipeline::new(device, surface_format, &camera_layout);
        let body_pipeline = BodyPipeline::new(device, surface_format, &camera_layout);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-camera"),
            contents: bytemuck::bytes_of(&Camera::default().to_uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery-camera-bg"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let ring = ring_vertices(settings.ring_segments);
        let ring_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-ring-vertices"),
            contents: bytemuck::cast_slice(&ring),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (sphere_vertices, sphere_indices) =
            unit_sphere(settings.sphere_stacks, settings.sphere_slices);
        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-sphere-vertices"),
            contents: bytemuck::cast_slice(&sphere_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery-sphere-indices"),
            contents: bytemuck::cast_slice(&sphere_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::info!(
            "Orrery renderer ready: {} ring vertices, {} sphere indices",
            ring.len(),
            sphere_indices.len()
        );

        Self {
            ring_pipeline,
            body_pipeline,
            camera_buffer,
            camera_bind_group,
            ring_vertex_buffer,
            ring_vertex_count: ring.len() as u32,
            sphere_vertex_buffer,
            sphere_index_buffer,
            sphere_index_count: sphere_indices.len() as u32,
            orbit_stream: InstanceBuffer::new(device, "orrery-orbit-instances", 16),
            body_stream: InstanceBuffer::new(device, "orrery-body-instances", 16),
        }
    }

    /// Recompile both instance streams from the live tree and upload them
    /// together with the camera uniform.
    ///
    /// Reads every body field fresh; nothing is cached across frames, so
    /// edits made by the parameter panel between frames are picked up
    /// automatically.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        roots: &[OrbitingBody],
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniform()),
        );

        let orbits = orbit_instances(roots);
        let bodies = body_instances(roots);
        debug_assert_eq!(
            orbits.len(),
            roots.iter().map(OrbitingBody::count_inclusive).sum::<usize>(),
        );
        self.orbit_stream.upload(device, queue, &orbits);
        self.body_stream.upload(device, queue, &bodies);
    }

    /// Record the two instanced draws. Call within a render pass that has
    /// the depth buffer attached.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.orbit_stream.count > 0 {
            pass.set_pipeline(&self.ring_pipeline.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, self.ring_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.orbit_stream.buffer.slice(..));
            pass.draw(0..self.ring_vertex_count, 0..self.orbit_stream.count);
        }

        if self.body_stream.count > 0 {
            pass.set_pipeline(&self.body_pipeline.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, self.sphere_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.body_stream.buffer.slice(..));
            pass.set_index_buffer(self.sphere_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.sphere_index_count, 0, 0..self.body_stream.count);
        }
    }

    /// Instances drawn per stream last frame (orbits, bodies).
    pub fn instance_counts(&self) -> (u32, u32) {
        (self.orbit_stream.count, self.body_stream.count)
    }
}
