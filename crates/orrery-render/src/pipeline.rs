//! The two instanced render pipelines: orbit rings and body markers.
//!
//! Both pipelines consume the same per-instance attribute layout
//! ([`RenderInstance::LAYOUT`]) and the same camera bind group, so one
//! uniform upload and one instance-record format serve both draws.

use std::num::NonZeroU64;

use orrery_instance::RenderInstance;

use crate::depth::DepthBuffer;
use crate::geometry::GeometryVertex;

/// WGSL for the orbit rings: flat instance color, no shading.
pub const RING_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    // Instance attributes: model matrix columns, then color.
    @location(1) transform_c0: vec4<f32>,
    @location(2) transform_c1: vec4<f32>,
    @location(3) transform_c2: vec4<f32>,
    @location(4) transform_c3: vec4<f32>,
    @location(5) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) @interpolate(flat) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let model = mat4x4<f32>(
        in.transform_c0, in.transform_c1, in.transform_c2, in.transform_c3,
    );
    var out: VertexOutput;
    out.clip_position = camera.view_proj * model * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// WGSL for the body markers: Lambert shading from a point light at the
/// origin (the star), with a 0.2 ambient floor so the dark limb stays
/// visible. A body whose color channels exceed 1.0 reads as self-lit
/// because the ambient term alone saturates the output.
pub const BODY_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) transform_c0: vec4<f32>,
    @location(2) transform_c1: vec4<f32>,
    @location(3) transform_c2: vec4<f32>,
    @location(4) transform_c3: vec4<f32>,
    @location(5) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) @interpolate(flat) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let model = mat4x4<f32>(
        in.transform_c0, in.transform_c1, in.transform_c2, in.transform_c3,
    );
    let world = model * vec4<f32>(in.position, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_pos = world.xyz;
    // Unit-sphere geometry: the position direction is the normal. The
    // model scale is uniform, so normalizing after the transform is exact.
    out.normal = normalize((model * vec4<f32>(in.position, 0.0)).xyz);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light = normalize(-in.world_pos);
    let n = normalize(in.normal);
    let diffuse = max(dot(n, light), 0.0);
    let lit = in.color * 0.2 + in.color * diffuse * 0.8;
    return vec4<f32>(lit, 1.0);
}
"#;

/// Bind group layout for the shared view-projection uniform (group 0).
pub fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("orrery-camera-bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(64), // mat4x4<f32>
            },
            count: None,
        }],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader_source: &str,
    surface_format: wgpu::TextureFormat,
    camera_layout: &wgpu::BindGroupLayout,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[camera_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[GeometryVertex::LAYOUT, RenderInstance::LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(DepthBuffer::depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None, // opaque
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// Line-strip pipeline drawing one closed circle per orbit instance.
pub struct RingPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl RingPipeline {
    /// Create the ring pipeline against the given surface format.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            pipeline: create_pipeline(
                device,
                "orrery-ring-pipeline",
                RING_SHADER_SOURCE,
                surface_format,
                camera_layout,
                wgpu::PrimitiveTopology::LineStrip,
            ),
        }
    }
}

/// Triangle-list pipeline drawing one shaded sphere per body instance.
pub struct BodyPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl BodyPipeline {
    /// Create the body pipeline against the given surface format.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            pipeline: create_pipeline(
                device,
                "orrery-body-pipeline",
                BODY_SHADER_SOURCE,
                surface_format,
                camera_layout,
                wgpu::PrimitiveTopology::TriangleList,
            ),
        }
    }
}
