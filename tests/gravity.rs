use approx::assert_relative_eq;

use dopri_physics::constants::{G_SIM, MAX_BODIES};
use dopri_physics::dynamics::{AttractingBody, BodySet, GravityParams, StepError};
use dopri_physics::vector::Vector3D;

const EARTH_MASS: f64 = 5.972e24;

fn earth() -> BodySet {
    BodySet::from_bodies(vec![AttractingBody::new(Vector3D::ZERO, EARTH_MASS)]).expect("bodies")
}

#[test]
fn single_body_pulls_with_inverse_square_magnitude() {
    let gravity = GravityParams::default();
    let position = Vector3D::new(665.0, 0.0, 0.0);
    let acc = gravity.acceleration(position, &earth());

    assert_relative_eq!(acc.x, -G_SIM * EARTH_MASS / (665.0 * 665.0), max_relative = 1e-12);
    assert_eq!(acc.y, 0.0);
    assert_eq!(acc.z, 0.0);
}

#[test]
fn empty_body_set_exerts_nothing() {
    let gravity = GravityParams::default();
    assert_eq!(
        gravity.acceleration(Vector3D::new(1.0, 2.0, 3.0), &BodySet::new()),
        Vector3D::ZERO
    );
}

#[test]
fn coincident_body_is_skipped() {
    let gravity = GravityParams::default();
    let position = Vector3D::new(5.0, 5.0, 5.0);
    let body = AttractingBody::new(position + Vector3D::new(1e-11, 0.0, 0.0), EARTH_MASS);
    assert_eq!(gravity.contribution(position, &body), Vector3D::ZERO);
    assert_eq!(
        gravity.contribution(position, &AttractingBody::new(position, EARTH_MASS)),
        Vector3D::ZERO
    );
}

#[test]
fn per_body_acceleration_is_capped() {
    let gravity = GravityParams::default();
    let body = AttractingBody::new(Vector3D::new(0.0, 0.0, 1.0), EARTH_MASS);
    let acc = gravity.contribution(Vector3D::ZERO, &body);
    assert_relative_eq!(acc.norm(), gravity.max_acceleration, max_relative = 1e-12);
    assert!(acc.z > 0.0);
}

#[test]
fn symmetric_bodies_cancel() {
    let gravity = GravityParams::default();
    let bodies = BodySet::from_parallel(
        &[Vector3D::new(-100.0, 0.0, 0.0), Vector3D::new(100.0, 0.0, 0.0)],
        &[EARTH_MASS, EARTH_MASS],
    )
    .expect("bodies");
    let acc = gravity.acceleration(Vector3D::ZERO, &bodies);
    assert_eq!(acc, Vector3D::ZERO);
}

#[test]
fn contributions_superpose() {
    let gravity = GravityParams::default();
    let a = AttractingBody::new(Vector3D::new(300.0, 0.0, 0.0), EARTH_MASS);
    let b = AttractingBody::new(Vector3D::new(0.0, -400.0, 50.0), 7.3e22);
    let bodies = BodySet::from_bodies(vec![a, b]).expect("bodies");
    let position = Vector3D::new(10.0, 20.0, 30.0);
    let total = gravity.acceleration(position, &bodies);
    let expected = gravity.contribution(position, &a) + gravity.contribution(position, &b);
    assert_eq!(total, expected);
}

#[test]
fn body_set_enforces_capacity() {
    assert_eq!(BodySet::CAPACITY, MAX_BODIES);
    let full = vec![AttractingBody::new(Vector3D::ZERO, 1.0); MAX_BODIES];
    let mut set = BodySet::try_from(full).expect("exactly at capacity");
    assert_eq!(set.len(), MAX_BODIES);
    assert_eq!(
        set.push(AttractingBody::new(Vector3D::ZERO, 1.0)),
        Err(StepError::TooManyBodies {
            count: MAX_BODIES + 1,
            capacity: MAX_BODIES
        })
    );

    let over = vec![AttractingBody::new(Vector3D::ZERO, 1.0); MAX_BODIES + 1];
    assert!(matches!(
        BodySet::from_bodies(over),
        Err(StepError::TooManyBodies { count: 257, .. })
    ));
}

#[test]
fn parallel_lists_must_match() {
    assert_eq!(
        BodySet::from_parallel(&[Vector3D::ZERO, Vector3D::ZERO], &[1.0]),
        Err(StepError::LengthMismatch {
            positions: 2,
            masses: 1
        })
    );
}

#[test]
fn first_body_is_primary() {
    let mut set = BodySet::new();
    assert!(set.primary().is_none());
    set.push(AttractingBody::new(Vector3D::new(1.0, 0.0, 0.0), 2.0))
        .expect("push");
    set.push(AttractingBody::new(Vector3D::new(9.0, 0.0, 0.0), 3.0))
        .expect("push");
    assert_eq!(set.primary().map(|b| b.mass), Some(2.0));
    assert_eq!(set.iter().count(), 2);
}
