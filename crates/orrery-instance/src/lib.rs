//! The transform compiler: flattens a forest of orbiting bodies into the
//! two contiguous per-instance streams the GPU pipelines consume.
//!
//! Each frame produces two streams with identical record layout: one record
//! per body for the sphere markers, one per body for the orbit rings. Both
//! walks accumulate the same parent matrix, so rings and bodies stay
//! aligned; they only differ in which scale goes into the emitted record.

mod compile;
mod record;

pub use compile::{BODY_RENDER_UNIT, body_instances, orbit_instances};
pub use record::{FLOATS_PER_INSTANCE, INSTANCE_STRIDE_BYTES, RenderInstance, as_floats};
