use std::sync::Arc;

use dopri_physics::atmosphere::init_default_model;
use dopri_physics::config::{DensitySampleConfig, PhysicsConfig, load_scenario};
use dopri_physics::dynamics::{DragMode, StepError};
use dopri_physics::export::trajectory::HEADER;
use dopri_physics::scenario::{
    ScenarioError, body_set_from_config, physics_model_from_config, run,
};

#[test]
fn leo_scenario_completes_one_revolution() {
    let scenario = load_scenario("data/scenarios/leo.yaml").expect("leo yaml");
    let result = run(&scenario).expect("run");

    assert_eq!(result.steps_taken, 540);
    assert_eq!(result.steps_skipped, 0);
    assert!(!result.drag_applied);
    // initial sample plus every tenth step
    assert_eq!(result.samples.len(), 55);
    assert_eq!(result.samples[0].step, 0);
    assert_eq!(result.samples.last().map(|s| s.step), Some(540));

    for sample in &result.samples {
        assert!((sample.altitude_km - 272.0).abs() < 0.01, "{sample:?}");
    }
    let drift = result.energy_drift.expect("primary present");
    assert!(drift.abs() < 1e-8, "energy drift {drift}");

    let start = result.initial_state.position;
    let end = result.final_state.position;
    assert!((end - start).norm() < 5.0, "orbit did not come back: {end:?}");
}

#[test]
fn applied_drag_lowers_the_orbit() {
    let scenario = load_scenario("data/scenarios/leo_drag.toml").expect("leo toml");
    let result = run(&scenario).expect("run");
    assert!(result.drag_applied);
    let drift = result.energy_drift.expect("primary present");
    // specific energy is negative, so losing energy shows up as a negative drift
    assert!(drift < 0.0, "expected energy loss, got {drift}");
    let final_altitude = result.summary().final_altitude_km;
    assert!(final_altitude < 272.0, "final altitude {final_altitude}");
}

#[test]
fn negligible_craft_mass_skips_every_step() {
    let mut scenario = load_scenario("data/scenarios/leo.yaml").expect("leo yaml");
    scenario.craft.mass = 0.0;
    scenario.integration.steps = 25;
    let result = run(&scenario).expect("run");
    assert_eq!(result.steps_taken, 0);
    assert_eq!(result.steps_skipped, 25);
    assert_eq!(result.final_state, result.initial_state);
}

#[test]
fn reference_physics_reuses_shared_atmosphere() {
    let model = physics_model_from_config(&PhysicsConfig::default()).expect("model");
    let shared = init_default_model().expect("default");
    assert!(Arc::ptr_eq(&model.atmosphere, &shared));
    assert_eq!(model.drag_mode, DragMode::Inert);

    let mut scaled = PhysicsConfig::default();
    scaled.atmosphere.density_scale = 0.5;
    let model = physics_model_from_config(&scaled).expect("scaled model");
    assert!(!Arc::ptr_eq(&model.atmosphere, &shared));
    assert_eq!(model.atmosphere.density_scale(), 0.5);
}

#[test]
fn custom_atmosphere_table_is_validated() {
    let mut physics = PhysicsConfig::default();
    physics.atmosphere.samples = Some(vec![
        DensitySampleConfig {
            altitude_km: 0.0,
            density: 1.0,
        },
        DensitySampleConfig {
            altitude_km: 10.0,
            density: 2.0,
        },
    ]);
    assert!(matches!(
        physics_model_from_config(&physics),
        Err(ScenarioError::Atmosphere(_))
    ));

    physics.atmosphere.samples = Some(vec![
        DensitySampleConfig {
            altitude_km: 0.0,
            density: 4.0,
        },
        DensitySampleConfig {
            altitude_km: 200.0,
            density: 1.0,
        },
    ]);
    let model = physics_model_from_config(&physics).expect("custom table");
    assert_eq!(model.atmosphere.ceiling_altitude_km(), 200.0);
}

#[test]
fn oversized_body_list_is_a_step_error() {
    let scenario = load_scenario("data/scenarios/leo.yaml").expect("leo yaml");
    let bodies = vec![scenario.bodies[0].clone(); 300];
    assert!(matches!(
        body_set_from_config(&bodies),
        Err(ScenarioError::Step(StepError::TooManyBodies { count: 300, .. }))
    ));
}

#[test]
fn csv_and_summary_describe_the_run() {
    let mut scenario = load_scenario("data/scenarios/leo.yaml").expect("leo yaml");
    scenario.integration.steps = 7;
    scenario.integration.sample_every = 3;
    let result = run(&scenario).expect("run");

    let mut buffer = Vec::new();
    result.write_csv(&mut buffer).expect("csv");
    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    let steps: Vec<&str> = lines.map(|l| l.split(',').next().unwrap_or("")).collect();
    assert_eq!(steps, ["0", "3", "6", "7"]);

    let summary = result.summary();
    assert_eq!(summary.scenario, "leo_circular");
    assert_eq!(summary.steps_requested, 7);
    assert_eq!(summary.steps_taken, 7);
    assert_eq!(summary.sample_count, 4);
    assert_eq!(summary.elapsed_time, 70.0);
    assert_eq!(summary.final_position, result.final_state.position.to_array());
}
