use std::mem::size_of;

use dopri_physics::atmosphere::DragParams;
use dopri_physics::dynamics::{
    AttractingBody, BodySet, BodyState, PhysicsModel, StepError, StepInputs, StepOutcome,
};
use dopri_physics::host::{HostDouble3, HostVector3, step_single};
use dopri_physics::vector::Vector3D;

const EARTH_MASS: f64 = 5.972e24;

fn model() -> PhysicsModel {
    PhysicsModel::reference().expect("reference model")
}

fn leo() -> (HostDouble3, HostDouble3) {
    (
        HostDouble3 {
            x: 665.0,
            y: 0.0,
            z: 0.0,
        },
        HostDouble3 {
            x: 0.0,
            y: 0.774,
            z: 0.0,
        },
    )
}

#[test]
fn host_layouts_are_packed_triples() {
    assert_eq!(size_of::<HostVector3>(), 12);
    assert_eq!(size_of::<HostDouble3>(), 24);
}

#[test]
fn step_updates_host_state_in_place() {
    let model = model();
    let (mut position, mut velocity) = leo();
    let bodies = [HostVector3::default()];
    let thrust = HostVector3 {
        x: 0.0,
        y: 0.5,
        z: 0.0,
    };

    let outcome = step_single(
        &model,
        &mut position,
        &mut velocity,
        1000.0,
        &bodies,
        &[EARTH_MASS],
        10.0,
        thrust,
        2.2,
        1.0e-6,
    )
    .expect("valid inputs");
    assert_eq!(outcome, StepOutcome::Advanced);

    let body_set =
        BodySet::from_bodies(vec![AttractingBody::new(Vector3D::ZERO, EARTH_MASS)]).expect("bodies");
    let (p0, v0) = leo();
    let mut expected = BodyState {
        position: p0.into(),
        velocity: v0.into(),
        mass: 1000.0,
    };
    model.step(
        &mut expected,
        &StepInputs {
            bodies: &body_set,
            dt: 10.0,
            thrust_impulse: Vector3D::new(0.0, 0.5, 0.0),
            drag: DragParams {
                coefficient: 2.2f32 as f64,
                area: 1.0e-6f32 as f64,
            },
        },
    );
    assert_eq!(position, HostDouble3::from(expected.position));
    assert_eq!(velocity, HostDouble3::from(expected.velocity));
}

#[test]
fn too_many_bodies_is_rejected_without_stepping() {
    let model = model();
    let (mut position, mut velocity) = leo();
    let bodies = vec![HostVector3::default(); 257];
    let masses = vec![1.0; 257];
    let result = step_single(
        &model,
        &mut position,
        &mut velocity,
        1000.0,
        &bodies,
        &masses,
        10.0,
        HostVector3::default(),
        0.0,
        0.0,
    );
    assert_eq!(
        result,
        Err(StepError::TooManyBodies {
            count: 257,
            capacity: 256
        })
    );
    assert_eq!((position, velocity), leo());
}

#[test]
fn mismatched_mass_list_is_rejected() {
    let model = model();
    let (mut position, mut velocity) = leo();
    let result = step_single(
        &model,
        &mut position,
        &mut velocity,
        1000.0,
        &[HostVector3::default(); 2],
        &[EARTH_MASS],
        10.0,
        HostVector3::default(),
        0.0,
        0.0,
    );
    assert!(matches!(result, Err(StepError::LengthMismatch { .. })));
    assert_eq!((position, velocity), leo());
}

#[test]
fn negligible_mass_leaves_host_state_bit_identical() {
    let model = model();
    let (mut position, mut velocity) = leo();
    let outcome = step_single(
        &model,
        &mut position,
        &mut velocity,
        1e-7,
        &[HostVector3::default()],
        &[EARTH_MASS],
        10.0,
        HostVector3 {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        },
        2.2,
        1.0,
    )
    .expect("valid inputs");
    assert_eq!(outcome, StepOutcome::Skipped);
    let (p0, v0) = leo();
    assert_eq!(position.x.to_bits(), p0.x.to_bits());
    assert_eq!(position.y.to_bits(), p0.y.to_bits());
    assert_eq!(velocity.y.to_bits(), v0.y.to_bits());
}

#[test]
fn single_precision_bodies_are_widened() {
    let body = HostVector3 {
        x: 0.1,
        y: -2.5,
        z: 3.0,
    };
    let widened: Vector3D = body.into();
    assert_eq!(widened.x, 0.1f32 as f64);
    assert_eq!(widened.y, -2.5);
    assert_eq!(widened.z, 3.0);
}
