//! Two-body orbit helpers used to seed scenarios and check propagated trajectories.
use std::f64::consts::TAU;

use dopri_core::vector::Vector3D;

/// Speed of a circular orbit of radius `r` about a body with gravitational parameter `gm`.
pub fn circular_speed(gm: f64, r: f64) -> f64 {
    (gm / r).sqrt()
}

/// Orbital period for semi-major axis `a`.
pub fn orbital_period(gm: f64, a: f64) -> f64 {
    TAU * (a * a * a / gm).sqrt()
}

/// Specific orbital energy `v²/2 - gm/r`.
pub fn specific_energy(gm: f64, position: Vector3D, velocity: Vector3D) -> f64 {
    0.5 * velocity.norm_squared() - gm / position.norm()
}

/// Specific angular momentum `r × v`.
pub fn specific_angular_momentum(position: Vector3D, velocity: Vector3D) -> Vector3D {
    position.cross(&velocity)
}

/// Prograde circular orbit in the xy-plane starting on the +x axis.
pub fn circular_state(gm: f64, radius: f64) -> (Vector3D, Vector3D) {
    (
        Vector3D::new(radius, 0.0, 0.0),
        Vector3D::new(0.0, circular_speed(gm, radius), 0.0),
    )
}

/// Conic radius at true anomaly `theta` for semi-major axis `a` and eccentricity `e < 1`.
pub fn conic_radius(a: f64, e: f64, theta: f64) -> f64 {
    a * (1.0 - e * e) / (1.0 + e * theta.cos())
}

/// `steps` planar points of an ellipse at uniformly spaced true anomaly, periapsis on +x.
pub fn sample_conic_orbit(a: f64, e: f64, steps: usize) -> Vec<Vector3D> {
    (0..steps)
        .map(|i| {
            let theta = TAU * i as f64 / steps as f64;
            let r = conic_radius(a, e, theta);
            Vector3D::new(r * theta.cos(), r * theta.sin(), 0.0)
        })
        .collect()
}
