//! Quadratic drag against an atmosphere rotating rigidly with the primary body.
//!
//! a = -½ Cd A ρ |v_rel| v_rel / m
//!
//! where v_rel is the craft velocity minus the air velocity ω × r about the
//! primary's polar (z) axis. Density and area are evaluated in kilometre units
//! and the result is converted back to simulation units.

use dopri_core::constants::{EARTH_RADIUS_KM, OMEGA_EARTH, UNIT_TO_KM};
use dopri_core::units::{area_sim_to_km2, vector_km_to_sim, vector_sim_to_km};
use dopri_core::vector::Vector3D;

use crate::table::DensityModel;

/// Densities below this are treated as vacuum.
pub const VACUUM_DENSITY: f64 = 1e-12;
/// Relative airspeeds below this (km/s) produce no drag.
pub const MIN_RELATIVE_SPEED_KM_S: f64 = 1e-6;

/// Geometry and rotation of the body the atmosphere belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryFrame {
    /// Kilometres per simulation length unit.
    pub unit_to_km: f64,
    pub radius_km: f64,
    pub rotation_rate_rad_s: f64,
}

impl Default for PrimaryFrame {
    fn default() -> Self {
        Self {
            unit_to_km: UNIT_TO_KM,
            radius_km: EARTH_RADIUS_KM,
            rotation_rate_rad_s: OMEGA_EARTH,
        }
    }
}

impl PrimaryFrame {
    /// Altitude above the surface (km, floored at zero) for a position relative to the
    /// primary's centre in simulation units.
    pub fn altitude_km(&self, relative_position: Vector3D) -> f64 {
        let r_km = vector_sim_to_km(relative_position, self.unit_to_km).norm();
        (r_km - self.radius_km).max(0.0)
    }

    /// Velocity of the co-rotating air at a position given in km, in km/s.
    pub fn air_velocity_km_s(&self, position_km: Vector3D) -> Vector3D {
        let omega = self.rotation_rate_rad_s;
        Vector3D::new(-omega * position_km.y, omega * position_km.x, 0.0)
    }
}

/// Aerodynamic parameters of the craft.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragParams {
    pub coefficient: f64,
    /// Cross-sectional area in simulation units².
    pub area: f64,
}

/// Drag acceleration in simulation units.
///
/// `relative_position` is measured from the primary's centre. Returns zero in vacuum
/// and when the craft moves with the air.
pub fn drag_acceleration(
    density: &DensityModel,
    frame: &PrimaryFrame,
    velocity: Vector3D,
    relative_position: Vector3D,
    mass: f64,
    params: DragParams,
) -> Vector3D {
    let position_km = vector_sim_to_km(relative_position, frame.unit_to_km);
    let altitude_km = (position_km.norm() - frame.radius_km).max(0.0);

    let rho = density.density(altitude_km);
    if rho < VACUUM_DENSITY {
        return Vector3D::ZERO;
    }

    let velocity_km_s = vector_sim_to_km(velocity, frame.unit_to_km);
    let relative = velocity_km_s - frame.air_velocity_km_s(position_km);
    let speed = relative.norm();
    if speed < MIN_RELATIVE_SPEED_KM_S {
        return Vector3D::ZERO;
    }

    let area_km2 = area_sim_to_km2(params.area, frame.unit_to_km);
    let factor = -0.5 * params.coefficient * area_km2 * rho / mass;
    vector_km_to_sim(relative * (factor * speed), frame.unit_to_km)
}
