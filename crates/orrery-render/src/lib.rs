//! GPU rendering for the orrery: device setup, camera, geometry and the
//! two instanced pipelines (orbit rings and body markers).

mod camera;
mod depth;
mod geometry;
mod gpu;
mod pipeline;
mod renderer;

pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use geometry::{GeometryVertex, ring_vertices, unit_sphere};
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pipeline::{
    BODY_SHADER_SOURCE, BodyPipeline, RING_SHADER_SOURCE, RingPipeline, camera_bind_group_layout,
};
pub use renderer::{OrreryRenderer, RendererSettings};
