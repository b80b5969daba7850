//! Boundary adapter for host engines that keep positions in mixed precision.
//!
//! Hosts hand over the integrated state as double-precision triples and the
//! attracting bodies as single-precision triples; timestep and drag parameters
//! arrive as `f32`. Everything is widened to `f64` before stepping.

use dopri_atmosphere::DragParams;
use dopri_core::constants::MIN_STEP_MASS;
use dopri_core::vector::Vector3D;
use dopri_dynamics::{BodySet, BodyState, PhysicsModel, StepError, StepInputs, StepOutcome};

/// Single-precision vector in the host's memory layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostVector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Double-precision vector in the host's memory layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostDouble3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<HostVector3> for Vector3D {
    fn from(v: HostVector3) -> Self {
        Vector3D::new(v.x as f64, v.y as f64, v.z as f64)
    }
}

impl From<HostDouble3> for Vector3D {
    fn from(v: HostDouble3) -> Self {
        Vector3D::new(v.x, v.y, v.z)
    }
}

impl From<Vector3D> for HostDouble3 {
    fn from(v: Vector3D) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Advance a host-owned state by one step, writing position and velocity back in place.
///
/// The body list is validated first: more than [`BodySet::CAPACITY`] entries, or a
/// mass list of a different length, is rejected without touching the state. A mass
/// at or below `1e-6` leaves the state bit-identical.
#[allow(clippy::too_many_arguments)]
pub fn step_single(
    model: &PhysicsModel,
    position: &mut HostDouble3,
    velocity: &mut HostDouble3,
    mass: f64,
    bodies: &[HostVector3],
    masses: &[f64],
    dt: f32,
    thrust_impulse: HostVector3,
    drag_coefficient: f32,
    area: f32,
) -> Result<StepOutcome, StepError> {
    let positions: Vec<Vector3D> = bodies.iter().map(|&b| b.into()).collect();
    let body_set = BodySet::from_parallel(&positions, masses)?;
    if mass <= MIN_STEP_MASS {
        return Ok(StepOutcome::Skipped);
    }

    let mut state = BodyState {
        position: (*position).into(),
        velocity: (*velocity).into(),
        mass,
    };
    let outcome = model.step(
        &mut state,
        &StepInputs {
            bodies: &body_set,
            dt: dt as f64,
            thrust_impulse: thrust_impulse.into(),
            drag: DragParams {
                coefficient: drag_coefficient as f64,
                area: area as f64,
            },
        },
    );

    *position = state.position.into();
    *velocity = state.velocity.into();
    Ok(outcome)
}
