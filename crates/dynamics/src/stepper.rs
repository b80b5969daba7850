//! Single fixed-size Dormand-Prince step for one body under gravity, thrust and drag.

use std::sync::Arc;

use dopri_atmosphere::{
    AtmosphereError, DensityModel, DragParams, PrimaryFrame, drag_acceleration,
    init_default_model,
};
use dopri_core::constants::MIN_STEP_MASS;
use dopri_core::vector::Vector3D;

use crate::StepError;
use crate::bodies::BodySet;
use crate::gravity::GravityParams;
use crate::tableau::{A, B, STAGES};

/// Whether drag enters the force balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragMode {
    /// Drag parameters are accepted but never applied.
    #[default]
    Inert,
    /// Drag is added to the acceleration at every stage.
    Applied,
}

/// Immutable force-model configuration shared by every step.
#[derive(Debug, Clone)]
pub struct PhysicsModel {
    pub gravity: GravityParams,
    pub frame: PrimaryFrame,
    pub atmosphere: Arc<DensityModel>,
    pub drag_mode: DragMode,
}

impl PhysicsModel {
    /// Reference constants over the process-wide reference atmosphere, drag inert.
    pub fn reference() -> Result<Self, AtmosphereError> {
        Ok(Self::with_atmosphere(init_default_model()?))
    }

    pub fn with_atmosphere(atmosphere: Arc<DensityModel>) -> Self {
        Self {
            gravity: GravityParams::default(),
            frame: PrimaryFrame::default(),
            atmosphere,
            drag_mode: DragMode::Inert,
        }
    }

    pub fn with_drag_mode(mut self, drag_mode: DragMode) -> Self {
        self.drag_mode = drag_mode;
        self
    }

    /// Advance `state` by `inputs.dt` in place.
    ///
    /// Bodies with `mass <= 1e-6` are immovable: the state is left untouched and
    /// [`StepOutcome::Skipped`] is returned.
    pub fn step(&self, state: &mut BodyState, inputs: &StepInputs<'_>) -> StepOutcome {
        if state.mass <= MIN_STEP_MASS {
            return StepOutcome::Skipped;
        }

        let stage = StageForces {
            model: self,
            bodies: inputs.bodies,
            primary: inputs
                .bodies
                .primary()
                .map(|b| b.position)
                .unwrap_or(Vector3D::ZERO),
            // thrust is held constant across all stages of the step
            thrust: inputs.thrust_impulse / state.mass,
            mass: state.mass,
            drag: inputs.drag,
        };

        let dt = inputs.dt;
        let mut kx = [Vector3D::ZERO; STAGES];
        let mut kv = [Vector3D::ZERO; STAGES];
        kx[0] = state.velocity;
        kv[0] = stage.acceleration(state.position, state.velocity);

        for i in 1..STAGES {
            let mut position = state.position;
            let mut velocity = state.velocity;
            for (a, (dx, dv)) in A[i].iter().zip(kx.iter().zip(kv.iter())).take(i) {
                let w = dt * a;
                position += *dx * w;
                velocity += *dv * w;
            }
            kx[i] = velocity;
            kv[i] = stage.acceleration(position, velocity);
        }

        for ((b, dx), dv) in B.iter().zip(kx.iter()).zip(kv.iter()) {
            let w = dt * b;
            state.position += *dx * w;
            state.velocity += *dv * w;
        }
        StepOutcome::Advanced
    }
}

/// State of the integrated body, owned by the caller and updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vector3D,
    pub velocity: Vector3D,
    pub mass: f64,
}

/// Per-call inputs to [`PhysicsModel::step`].
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    pub bodies: &'a BodySet,
    pub dt: f64,
    /// Impulse (force × dt) applied over the step; divided by the body mass once.
    pub thrust_impulse: Vector3D,
    pub drag: DragParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// Negligible mass, state unchanged.
    Skipped,
}

struct StageForces<'a> {
    model: &'a PhysicsModel,
    bodies: &'a BodySet,
    primary: Vector3D,
    thrust: Vector3D,
    mass: f64,
    drag: DragParams,
}

impl StageForces<'_> {
    fn acceleration(&self, position: Vector3D, velocity: Vector3D) -> Vector3D {
        let mut acc = self.model.gravity.acceleration(position, self.bodies) + self.thrust;
        if self.model.drag_mode == DragMode::Applied {
            acc += drag_acceleration(
                &self.model.atmosphere,
                &self.model.frame,
                velocity,
                position - self.primary,
                self.mass,
                self.drag,
            );
        }
        acc
    }
}

/// Validate parallel body slices and advance `state` by one step.
///
/// Rejects more than [`BodySet::CAPACITY`] bodies or mismatched slice lengths before
/// touching the state.
pub fn step(
    model: &PhysicsModel,
    state: &mut BodyState,
    body_positions: &[Vector3D],
    body_masses: &[f64],
    dt: f64,
    thrust_impulse: Vector3D,
    drag: DragParams,
) -> Result<StepOutcome, StepError> {
    let bodies = BodySet::from_parallel(body_positions, body_masses)?;
    Ok(model.step(
        state,
        &StepInputs {
            bodies: &bodies,
            dt,
            thrust_impulse,
            drag,
        },
    ))
}
