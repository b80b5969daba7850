//! Softened, capped Newtonian gravity summed over the attracting bodies.

use dopri_core::constants::{G_SIM, MAX_ACCELERATION, MIN_DISTANCE_SQ};
use dopri_core::vector::Vector3D;

use crate::bodies::{AttractingBody, BodySet};

/// Gravitational constants of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    pub gravitational_constant: f64,
    /// Bodies closer than `sqrt(min_distance_sq)` contribute nothing.
    pub min_distance_sq: f64,
    /// Per-body cap on the acceleration magnitude.
    pub max_acceleration: f64,
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SIM,
            min_distance_sq: MIN_DISTANCE_SQ,
            max_acceleration: MAX_ACCELERATION,
        }
    }
}

impl GravityParams {
    /// Total gravitational acceleration at `position`.
    ///
    /// Independent of the attracted body's own mass.
    pub fn acceleration(&self, position: Vector3D, bodies: &BodySet) -> Vector3D {
        let mut acc = Vector3D::ZERO;
        for body in bodies {
            acc += self.contribution(position, body);
        }
        acc
    }

    /// Acceleration at `position` due to a single body.
    pub fn contribution(&self, position: Vector3D, body: &AttractingBody) -> Vector3D {
        let delta = body.position - position;
        let r2 = delta.norm_squared();
        if r2 < self.min_distance_sq {
            return Vector3D::ZERO;
        }
        let raw = self.gravitational_constant * body.mass / r2;
        let magnitude = raw.min(self.max_acceleration);
        delta * (magnitude / r2.sqrt())
    }
}
