//! The built-in demo system: one star, five planets, a moon and a sub-moon.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_8, PI};

use crate::{BodyParams, OrbitingBody};

/// Build the demo star system.
///
/// A yellow star at the origin with five planets of varying radius, speed
/// and starting phase; the fourth planet carries a moon which itself
/// carries a sub-moon on a steeply inclined orbit. Planet 5 orbits in a
/// plane tilted by π/8.
pub fn sample_system() -> OrbitingBody {
    let mut star = OrbitingBody::new(
        "Star",
        BodyParams {
            color: [1.0, 1.0, 0.0],
            scale: 6.0,
            angular_velocity: 0.0,
            ..BodyParams::default()
        },
    );

    let planets = [
        ("Planet 1", 1.25, 0.0, [1.0, 0.5, 1.0], 1.5, 0.2, -FRAC_PI_2),
        ("Planet 2", 2.0, 0.0, [0.4, 0.7, 1.0], 2.0, -0.15, PI),
        ("Planet 3", 3.0, 0.0, [1.0, 0.6, 0.6], 2.5, 0.1, FRAC_PI_3),
        ("Planet 4", 4.0, 0.0, [0.6, 1.0, 0.6], 3.5, -0.05, -FRAC_PI_2),
        (
            "Planet 5",
            5.5,
            FRAC_PI_8,
            [0.7, 0.7, 1.0],
            1.0,
            0.03,
            -FRAC_PI_2,
        ),
    ];

    for (name, orbital_radius, inclination, color, scale, angular_velocity, phase) in planets {
        let mut planet = OrbitingBody::new(
            name,
            BodyParams {
                orbital_radius,
                inclination,
                color,
                scale,
                angular_velocity,
                phase,
            },
        );

        if name == "Planet 4" {
            let mut moon = OrbitingBody::new(
                "Moon",
                BodyParams {
                    orbital_radius: 1.0,
                    inclination: -FRAC_PI_8,
                    color: [1.0, 1.0, 1.0],
                    scale: 1.0,
                    angular_velocity: 0.1,
                    phase: 0.0,
                },
            );
            moon.add_satellite(OrbitingBody::new(
                "Submoon",
                BodyParams {
                    orbital_radius: 0.5,
                    inclination: -FRAC_PI_4,
                    color: [1.0, 0.4, 0.4],
                    scale: 1.0,
                    angular_velocity: -0.2,
                    phase: PI,
                },
            ));
            planet.add_satellite(moon);
        }

        star.add_satellite(planet);
    }

    star
}
