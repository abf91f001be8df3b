//! Recursive flattening of the body tree into per-instance records.
//!
//! Both passes visit the forest in pre-order (a node before its children,
//! siblings left to right), matching `OrbitingBody::count_inclusive` exactly.
//! The accumulated parent matrix carries rotation and translation only;
//! scale is applied to the emitted record and never propagated downward.

use glam::{Mat4, Vec3};
use orrery_scene::OrbitingBody;

use crate::RenderInstance;

/// Divisor turning a body's `scale` into world units for the marker sphere.
pub const BODY_RENDER_UNIT: f32 = 10.0;

/// Flatten a forest into one sphere-marker record per body.
///
/// Per node the local transform is composed in this exact order on top of
/// the parent matrix: rotate about local X by the inclination, rotate about
/// local Y by the phase, translate along local X by the orbital radius,
/// then rotate about local Y by the negated phase so the body itself does
/// not spin as it revolves. That matrix, scale excluded, is what the
/// children inherit; the emitted record additionally scales uniformly by
/// `scale / BODY_RENDER_UNIT`.
pub fn body_instances(bodies: &[OrbitingBody]) -> Vec<RenderInstance> {
    let mut out = Vec::with_capacity(count_forest(bodies));
    collect_bodies(bodies, Mat4::IDENTITY, &mut out);
    out
}

/// Flatten a forest into one orbit-ring record per body.
///
/// The walk is identical to [`body_instances`] — same traversal, same
/// child matrix — but the emitted record diverges after the phase
/// rotation: the ring matrix scales the unit circle by the orbital radius
/// so it sits centered on the parent. A root with radius 0 emits a
/// degenerate zero-scale ring, which draws as a zero-size loop.
pub fn orbit_instances(bodies: &[OrbitingBody]) -> Vec<RenderInstance> {
    let mut out = Vec::with_capacity(count_forest(bodies));
    collect_orbits(bodies, Mat4::IDENTITY, &mut out);
    out
}

fn count_forest(bodies: &[OrbitingBody]) -> usize {
    bodies.iter().map(OrbitingBody::count_inclusive).sum()
}

/// The in-orbit frame of a body: everything up to and including the
/// un-rotation by phase, scale excluded. This is the parent matrix for the
/// body's satellites in both passes.
fn orbital_frame(parent: Mat4, body: &OrbitingBody) -> Mat4 {
    parent
        * Mat4::from_rotation_x(body.inclination)
        * Mat4::from_rotation_y(body.phase)
        * Mat4::from_translation(Vec3::new(body.orbital_radius, 0.0, 0.0))
        * Mat4::from_rotation_y(-body.phase)
}

fn collect_bodies(bodies: &[OrbitingBody], parent: Mat4, out: &mut Vec<RenderInstance>) {
    for body in bodies {
        let frame = orbital_frame(parent, body);
        let scaled = frame * Mat4::from_scale(Vec3::splat(body.scale / BODY_RENDER_UNIT));
        out.push(RenderInstance::new(scaled, body.color));
        collect_bodies(body.children(), frame, out);
    }
}

fn collect_orbits(bodies: &[OrbitingBody], parent: Mat4, out: &mut Vec<RenderInstance>) {
    for body in bodies {
        let plane = parent
            * Mat4::from_rotation_x(body.inclination)
            * Mat4::from_rotation_y(body.phase);
        let ring = plane * Mat4::from_scale(Vec3::splat(body.orbital_radius));
        out.push(RenderInstance::new(ring, body.color));

        let frame = plane
            * Mat4::from_translation(Vec3::new(body.orbital_radius, 0.0, 0.0))
            * Mat4::from_rotation_y(-body.phase);
        collect_orbits(body.children(), frame, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FLOATS_PER_INSTANCE, as_floats};
    use orrery_scene::{BodyParams, sample_system};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

    fn body(params: BodyParams) -> OrbitingBody {
        OrbitingBody::new("test", params)
    }

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert!((x - y).abs() < 1e-5, "matrices differ:\n{a}\nvs\n{b}");
        }
    }

    #[test]
    fn test_buffer_length_matches_instance_count() {
        let system = sample_system();
        let count = system.count_inclusive();
        let forest = std::slice::from_ref(&system);

        let bodies = body_instances(forest);
        let orbits = orbit_instances(forest);
        assert_eq!(bodies.len(), count);
        assert_eq!(orbits.len(), count);
        assert_eq!(as_floats(&bodies).len(), FLOATS_PER_INSTANCE * count);
        assert_eq!(as_floats(&orbits).len(), FLOATS_PER_INSTANCE * count);
    }

    #[test]
    fn test_preorder_root_record_comes_first() {
        let system = sample_system();
        let records = body_instances(std::slice::from_ref(&system));
        // The star has color [1, 1, 0] and sits at the origin.
        assert_eq!(records[0].color, [1.0, 1.0, 0.0]);
        assert_eq!(records[0].translation(), Vec3::ZERO);
        // First child follows immediately.
        assert_eq!(records[1].color, system.children()[0].color);
    }

    #[test]
    fn test_flatten_is_idempotent_between_updates() {
        let system = sample_system();
        let forest = std::slice::from_ref(&system);
        assert_eq!(body_instances(forest), body_instances(forest));
        assert_eq!(orbit_instances(forest), orbit_instances(forest));
    }

    #[test]
    fn test_child_translation_along_local_x() {
        // Root at the origin with one child at radius 2, no inclination,
        // phase 0: the child's marker sits at (2, 0, 0).
        let mut root = body(BodyParams::default());
        root.add_satellite(body(BodyParams {
            orbital_radius: 2.0,
            ..BodyParams::default()
        }));

        let records = body_instances(std::slice::from_ref(&root));
        let child_pos = records[1].translation();
        assert!((child_pos - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_radius_root_emits_degenerate_ring() {
        let root = body(BodyParams::default());
        let records = orbit_instances(std::slice::from_ref(&root));
        // All basis columns collapse to zero; any ring vertex maps to the
        // origin instead of failing.
        let m = Mat4::from_cols_array_2d(&records[0].transform);
        let on_ring = m * glam::Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(on_ring.truncate(), Vec3::ZERO);
    }

    #[test]
    fn test_record_scale_is_body_scale_over_render_unit() {
        let root = body(BodyParams {
            scale: 5.0,
            ..BodyParams::default()
        });
        let records = body_instances(std::slice::from_ref(&root));
        let m = Mat4::from_cols_array_2d(&records[0].transform);
        let x_basis = m.x_axis.truncate().length();
        assert!((x_basis - 0.5).abs() < 1e-6, "got basis length {x_basis}");
    }

    #[test]
    fn test_scale_does_not_propagate_to_children() {
        let mut root = body(BodyParams {
            scale: 8.0,
            ..BodyParams::default()
        });
        root.add_satellite(body(BodyParams {
            orbital_radius: 3.0,
            scale: 1.0,
            ..BodyParams::default()
        }));

        let records = body_instances(std::slice::from_ref(&root));
        // Were the parent's scale inherited, the child would sit at 2.4.
        let child_pos = records[1].translation();
        assert!((child_pos.x - 3.0).abs() < 1e-6, "got {}", child_pos.x);
    }

    #[test]
    fn test_grandchild_composes_ancestor_frames_in_order() {
        let mut root = body(BodyParams {
            inclination: FRAC_PI_6,
            phase: 0.7,
            ..BodyParams::default()
        });
        let mut child = body(BodyParams {
            orbital_radius: 2.0,
            inclination: 0.3,
            phase: 1.1,
            ..BodyParams::default()
        });
        child.add_satellite(body(BodyParams {
            orbital_radius: 0.5,
            inclination: -0.2,
            phase: 2.0,
            scale: 4.0,
            ..BodyParams::default()
        }));
        root.add_satellite(child.clone());

        // Reference: compose each ancestor frame independently with glam.
        let step = |parent: Mat4, b: &OrbitingBody| {
            parent
                * Mat4::from_rotation_x(b.inclination)
                * Mat4::from_rotation_y(b.phase)
                * Mat4::from_translation(Vec3::new(b.orbital_radius, 0.0, 0.0))
                * Mat4::from_rotation_y(-b.phase)
        };
        let root_frame = step(Mat4::IDENTITY, &root);
        let child_frame = step(root_frame, &child);
        let grandchild = &child.children()[0];
        let expected = step(child_frame, grandchild)
            * Mat4::from_scale(Vec3::splat(grandchild.scale / BODY_RENDER_UNIT));

        let records = body_instances(std::slice::from_ref(&root));
        let got = Mat4::from_cols_array_2d(&records[2].transform);
        assert_mat4_eq(got, expected);
    }

    #[test]
    fn test_swapping_rotation_and_translation_breaks_composition() {
        // Rotation and translation do not commute; a traversal that
        // translates before applying the phase rotation must disagree with
        // the compiler whenever phase and radius are both nonzero.
        let b = body(BodyParams {
            orbital_radius: 2.0,
            phase: FRAC_PI_2,
            ..BodyParams::default()
        });
        let swapped = Mat4::from_translation(Vec3::new(b.orbital_radius, 0.0, 0.0))
            * Mat4::from_rotation_y(b.phase)
            * Mat4::from_rotation_y(-b.phase)
            * Mat4::from_scale(Vec3::splat(b.scale / BODY_RENDER_UNIT));

        let records = body_instances(std::slice::from_ref(&b));
        let got = Mat4::from_cols_array_2d(&records[0].transform);
        let difference: f32 = got
            .to_cols_array()
            .iter()
            .zip(swapped.to_cols_array().iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(difference > 1.0, "swapped order unexpectedly matched");
    }

    #[test]
    fn test_orbit_and_body_passes_agree_on_child_frames() {
        // A grandchild's marker position depends only on the accumulated
        // parent frames, which both passes must compute identically. Verify
        // via the ring center of the grandchild: it must coincide with the
        // parent's marker position.
        let system = sample_system();
        let records = body_instances(std::slice::from_ref(&system));
        let rings = orbit_instances(std::slice::from_ref(&system));

        // Pre-order indices in the sample system: 4 = Planet 4, 5 = Moon.
        let planet4_pos = records[4].translation();
        let moon_ring_center = rings[5].translation();
        assert!(
            (planet4_pos - moon_ring_center).length() < 1e-5,
            "ring center {moon_ring_center} drifted from parent {planet4_pos}"
        );
    }

    #[test]
    fn test_phase_moves_body_around_parent() {
        let quarter = body(BodyParams {
            orbital_radius: 2.0,
            phase: FRAC_PI_2,
            ..BodyParams::default()
        });
        let records = body_instances(std::slice::from_ref(&quarter));
        // Rotating (2, 0, 0) by +π/2 about Y lands on (0, 0, -2).
        let pos = records[0].translation();
        assert!((pos - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5, "got {pos}");
    }
}
