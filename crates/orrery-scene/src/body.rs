//! A single node in the orbital hierarchy and its per-tick phase update.

use std::f32::consts::TAU;

/// Construction parameters for an [`OrbitingBody`].
///
/// Defaults describe a stationary magenta body at the parent's center:
/// override only what the scene needs.
#[derive(Debug, Clone)]
pub struct BodyParams {
    /// Distance from the parent's center. 0 for a root body.
    pub orbital_radius: f32,
    /// Tilt of the orbital plane about the parent's local X axis, in
    /// radians. Conventionally in [-π/2, π/2].
    pub inclination: f32,
    /// Linear RGB color. Values above 1.0 are accepted and give an
    /// emissive, self-lit appearance.
    pub color: [f32; 3],
    /// Visual size of the body, in tenths of a world unit.
    pub scale: f32,
    /// Signed revolutions per second; the sign sets the orbit direction.
    pub angular_velocity: f32,
    /// Starting angle within the orbit, in radians.
    pub phase: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            orbital_radius: 0.0,
            inclination: 0.0,
            color: [1.0, 0.0, 1.0],
            scale: 1.0,
            angular_velocity: 1.0,
            phase: 0.0,
        }
    }
}

/// A body on a perfectly circular orbit around its parent, which may carry
/// satellites of its own.
///
/// The tree shape is fixed after construction: children are added with
/// [`add_satellite`](Self::add_satellite) during scene setup and the node
/// owns them exclusively. Parameters are not validated; out-of-range values
/// propagate into the transform math and render as-is.
#[derive(Debug, Clone)]
pub struct OrbitingBody {
    /// Display name, not interpreted anywhere.
    pub name: String,
    /// Distance from the parent's center.
    pub orbital_radius: f32,
    /// Orbital plane tilt about the parent's local X axis, radians.
    pub inclination: f32,
    /// Linear RGB color, unclamped.
    pub color: [f32; 3],
    /// Visual size of the body.
    pub scale: f32,
    /// Signed revolutions per second.
    pub angular_velocity: f32,
    /// Current angle within the orbit, kept in [0, 2π) by
    /// [`update`](Self::update).
    pub phase: f32,
    children: Vec<OrbitingBody>,
}

impl OrbitingBody {
    /// Create a body with the given name and parameters and no satellites.
    pub fn new(name: impl Into<String>, params: BodyParams) -> Self {
        Self {
            name: name.into(),
            orbital_radius: params.orbital_radius,
            inclination: params.inclination,
            color: params.color,
            scale: params.scale,
            angular_velocity: params.angular_velocity,
            phase: params.phase,
            children: Vec::new(),
        }
    }

    /// Append a satellite. Child order is render order and determines the
    /// instance layout in the flattened buffers, so it is preserved.
    pub fn add_satellite(&mut self, satellite: OrbitingBody) {
        self.children.push(satellite);
    }

    /// The satellites of this body, in insertion order.
    pub fn children(&self) -> &[OrbitingBody] {
        &self.children
    }

    /// Mutable access to the satellites, for the parameter panel. The tree
    /// shape itself is fixed; only leaf fields are edited through this.
    pub fn children_mut(&mut self) -> &mut [OrbitingBody] {
        &mut self.children
    }

    /// Advance this body's phase and every descendant's by the same frame
    /// delta, in milliseconds.
    ///
    /// The phase advances by `angular_velocity * delta_ms / 1000 * 2π` and
    /// is renormalized with `rem_euclid`, so the result is in [0, 2π) even
    /// when the velocity is negative. Call at most once per frame per root;
    /// no other field is touched.
    pub fn update(&mut self, delta_ms: f32) {
        let advance = self.angular_velocity * delta_ms / 1000.0 * TAU;
        let wrapped = (self.phase + advance).rem_euclid(TAU);
        // rem_euclid rounds up to exactly TAU for tiny negative inputs,
        // which would escape the half-open range.
        self.phase = if wrapped >= TAU { 0.0 } else { wrapped };
        for child in &mut self.children {
            child.update(delta_ms);
        }
    }

    /// Number of bodies in this subtree, counting this one.
    ///
    /// This is the instance count for the instanced draw calls: the
    /// flattened buffers must contain exactly this many records.
    pub fn count_inclusive(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OrbitingBody::count_inclusive)
            .sum::<usize>()
    }
}
