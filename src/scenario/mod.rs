//! Scenario runner: builds the force model from configuration and propagates a craft
//! with a fixed timestep, recording sampled trajectory points.

use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;

use dopri_atmosphere::{
    AtmosphereError, DensityModel, DensitySample, DragParams, PrimaryFrame, REFERENCE_SAMPLES,
    init_default_model,
};
use dopri_config::{BodyConfig, ConfigError, DragModeConfig, PhysicsConfig, ScenarioConfig};
use dopri_core::constants::DENSITY_SCALE;
use dopri_core::vector::Vector3D;
use dopri_dynamics::{
    AttractingBody, BodySet, BodyState, DragMode, GravityParams, PhysicsModel, StepError,
    StepInputs, StepOutcome,
};
use dopri_export::summary::RunSummary;
use dopri_export::trajectory;
use dopri_orbits::specific_energy;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario configuration is invalid: {0}")]
    Config(#[from] ConfigError),
    #[error("atmosphere table is invalid: {0}")]
    Atmosphere(#[from] AtmosphereError),
    #[error("step inputs rejected: {0}")]
    Step(#[from] StepError),
}

/// Convert file configuration into the runtime force model.
///
/// The process-wide reference atmosphere is reused unless the configuration
/// overrides the sample table or the density scale.
pub fn physics_model_from_config(config: &PhysicsConfig) -> Result<PhysicsModel, ScenarioError> {
    let atmosphere = match &config.atmosphere.samples {
        None if config.atmosphere.density_scale == DENSITY_SCALE => init_default_model()?,
        None => Arc::new(DensityModel::with_density_scale(
            &REFERENCE_SAMPLES,
            config.atmosphere.density_scale,
        )?),
        Some(samples) => {
            let samples: Vec<DensitySample> = samples
                .iter()
                .map(|s| DensitySample {
                    altitude_km: s.altitude_km,
                    density: s.density,
                })
                .collect();
            Arc::new(DensityModel::with_density_scale(
                &samples,
                config.atmosphere.density_scale,
            )?)
        }
    };

    Ok(PhysicsModel {
        gravity: GravityParams {
            gravitational_constant: config.gravity.gravitational_constant,
            min_distance_sq: config.gravity.min_distance_sq,
            max_acceleration: config.gravity.max_acceleration,
        },
        frame: PrimaryFrame {
            unit_to_km: config.primary.unit_to_km,
            radius_km: config.primary.radius_km,
            rotation_rate_rad_s: config.primary.rotation_rate_rad_s,
        },
        atmosphere,
        drag_mode: match config.drag.mode {
            DragModeConfig::Inert => DragMode::Inert,
            DragModeConfig::Applied => DragMode::Applied,
        },
    })
}

/// Build the capacity-checked body set, first entry as primary.
pub fn body_set_from_config(bodies: &[BodyConfig]) -> Result<BodySet, ScenarioError> {
    let bodies = bodies
        .iter()
        .map(|b| AttractingBody::new(b.position.into(), b.mass))
        .collect();
    Ok(BodySet::from_bodies(bodies)?)
}

/// One recorded point of a propagated trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub step: usize,
    pub time: f64,
    pub position: Vector3D,
    pub velocity: Vector3D,
    /// Altitude above the primary's surface, floored at zero.
    pub altitude_km: f64,
    pub speed: f64,
}

impl TrajectorySample {
    pub fn record(&self) -> trajectory::Record {
        trajectory::Record {
            step: self.step,
            time: self.time,
            position: self.position.to_array(),
            velocity: self.velocity.to_array(),
            altitude_km: self.altitude_km,
            speed: self.speed,
        }
    }
}

/// Result of a scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub name: String,
    pub dt: f64,
    pub steps_requested: usize,
    pub initial_state: BodyState,
    pub final_state: BodyState,
    pub steps_taken: usize,
    pub steps_skipped: usize,
    pub drag_applied: bool,
    pub samples: Vec<TrajectorySample>,
    /// Relative change of two-body specific energy about the primary, if there is one.
    pub energy_drift: Option<f64>,
}

impl ScenarioRun {
    pub fn summary(&self) -> RunSummary {
        let final_altitude_km = self.samples.last().map(|s| s.altitude_km).unwrap_or(0.0);
        RunSummary {
            scenario: self.name.clone(),
            dt: self.dt,
            steps_requested: self.steps_requested,
            steps_taken: self.steps_taken,
            steps_skipped: self.steps_skipped,
            elapsed_time: self.dt * self.steps_taken as f64,
            drag_applied: self.drag_applied,
            initial_position: self.initial_state.position.to_array(),
            initial_velocity: self.initial_state.velocity.to_array(),
            final_position: self.final_state.position.to_array(),
            final_velocity: self.final_state.velocity.to_array(),
            final_altitude_km,
            energy_drift: self.energy_drift,
            sample_count: self.samples.len(),
        }
    }

    /// Write the sampled trajectory as CSV.
    pub fn write_csv(&self, writer: &mut dyn Write) -> io::Result<()> {
        trajectory::write_header(writer)?;
        for sample in &self.samples {
            sample.record().write_to(writer)?;
        }
        writer.flush()
    }
}

/// Run a scenario with the force model described by its own configuration.
pub fn run(config: &ScenarioConfig) -> Result<ScenarioRun, ScenarioError> {
    let model = physics_model_from_config(&config.physics)?;
    run_with_model(config, &model)
}

/// Run a scenario against an explicit force model, ignoring `config.physics`.
pub fn run_with_model(
    config: &ScenarioConfig,
    model: &PhysicsModel,
) -> Result<ScenarioRun, ScenarioError> {
    config.validate()?;
    let bodies = body_set_from_config(&config.bodies)?;
    let craft = &config.craft;
    let integration = &config.integration;

    let inputs = StepInputs {
        bodies: &bodies,
        dt: integration.dt,
        thrust_impulse: craft.thrust_impulse.into(),
        drag: DragParams {
            coefficient: craft.drag_coefficient,
            area: craft.area,
        },
    };
    let initial_state = BodyState {
        position: craft.position.into(),
        velocity: craft.velocity.into(),
        mass: craft.mass,
    };

    log::info!(
        "running scenario '{}': {} steps of {} with {} attracting bodies (drag {:?})",
        config.name,
        integration.steps,
        integration.dt,
        bodies.len(),
        model.drag_mode
    );

    let probe = Probe::new(model, &bodies);
    let mut state = initial_state;
    let mut samples = vec![probe.sample(0, 0.0, &state)];
    let mut steps_taken = 0;
    let mut steps_skipped = 0;

    for step in 1..=integration.steps {
        match model.step(&mut state, &inputs) {
            StepOutcome::Advanced => steps_taken += 1,
            StepOutcome::Skipped => {
                if steps_skipped == 0 {
                    log::warn!(
                        "scenario '{}': craft mass {} is negligible, steps leave it in place",
                        config.name,
                        state.mass
                    );
                }
                steps_skipped += 1;
            }
        }
        if step % integration.sample_every == 0 || step == integration.steps {
            let sample = probe.sample(step, step as f64 * integration.dt, &state);
            log::debug!(
                "step {}: altitude {:.3} km, speed {:e}",
                sample.step,
                sample.altitude_km,
                sample.speed
            );
            samples.push(sample);
        }
    }

    let energy_drift = probe.energy_drift(&initial_state, &state);
    log::info!(
        "scenario '{}' finished: {} steps taken, {} skipped, {} samples",
        config.name,
        steps_taken,
        steps_skipped,
        samples.len()
    );

    Ok(ScenarioRun {
        name: config.name.clone(),
        dt: integration.dt,
        steps_requested: integration.steps,
        initial_state,
        final_state: state,
        steps_taken,
        steps_skipped,
        drag_applied: model.drag_mode == DragMode::Applied,
        samples,
        energy_drift,
    })
}

/// Measures samples relative to the primary body.
struct Probe<'a> {
    frame: &'a PrimaryFrame,
    primary: Option<AttractingBody>,
    gravitational_constant: f64,
}

impl<'a> Probe<'a> {
    fn new(model: &'a PhysicsModel, bodies: &BodySet) -> Self {
        Self {
            frame: &model.frame,
            primary: bodies.primary().copied(),
            gravitational_constant: model.gravity.gravitational_constant,
        }
    }

    fn relative_position(&self, state: &BodyState) -> Vector3D {
        match &self.primary {
            Some(primary) => state.position - primary.position,
            None => state.position,
        }
    }

    fn sample(&self, step: usize, time: f64, state: &BodyState) -> TrajectorySample {
        TrajectorySample {
            step,
            time,
            position: state.position,
            velocity: state.velocity,
            altitude_km: self.frame.altitude_km(self.relative_position(state)),
            speed: state.velocity.norm(),
        }
    }

    fn energy_drift(&self, initial: &BodyState, current: &BodyState) -> Option<f64> {
        let primary = self.primary?;
        let gm = self.gravitational_constant * primary.mass;
        let e0 = specific_energy(gm, self.relative_position(initial), initial.velocity);
        let e1 = specific_energy(gm, self.relative_position(current), current.velocity);
        if e0 == 0.0 || !e0.is_finite() {
            return None;
        }
        Some((e1 - e0) / e0.abs())
    }
}
