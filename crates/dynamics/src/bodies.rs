//! Fixed-capacity set of attracting bodies for a single step.

use dopri_core::constants::MAX_BODIES;
use dopri_core::vector::Vector3D;

use crate::StepError;

/// Point mass that attracts the integrated body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractingBody {
    pub position: Vector3D,
    pub mass: f64,
}

impl AttractingBody {
    pub fn new(position: Vector3D, mass: f64) -> Self {
        Self { position, mass }
    }
}

/// Ordered list of at most [`BodySet::CAPACITY`] attracting bodies.
///
/// The first body is the primary: drag is measured relative to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodySet {
    bodies: Vec<AttractingBody>,
}

impl BodySet {
    pub const CAPACITY: usize = MAX_BODIES;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bodies(bodies: Vec<AttractingBody>) -> Result<Self, StepError> {
        check_capacity(bodies.len())?;
        Ok(Self { bodies })
    }

    /// Build from parallel position and mass sequences of equal length.
    pub fn from_parallel(positions: &[Vector3D], masses: &[f64]) -> Result<Self, StepError> {
        if positions.len() != masses.len() {
            return Err(StepError::LengthMismatch {
                positions: positions.len(),
                masses: masses.len(),
            });
        }
        check_capacity(positions.len())?;
        let bodies = positions
            .iter()
            .zip(masses)
            .map(|(&position, &mass)| AttractingBody { position, mass })
            .collect();
        Ok(Self { bodies })
    }

    pub fn push(&mut self, body: AttractingBody) -> Result<(), StepError> {
        check_capacity(self.bodies.len() + 1)?;
        self.bodies.push(body);
        Ok(())
    }

    pub fn primary(&self) -> Option<&AttractingBody> {
        self.bodies.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttractingBody> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[AttractingBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl TryFrom<Vec<AttractingBody>> for BodySet {
    type Error = StepError;

    fn try_from(bodies: Vec<AttractingBody>) -> Result<Self, Self::Error> {
        Self::from_bodies(bodies)
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a AttractingBody;
    type IntoIter = std::slice::Iter<'a, AttractingBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

fn check_capacity(count: usize) -> Result<(), StepError> {
    if count > BodySet::CAPACITY {
        return Err(StepError::TooManyBodies {
            count,
            capacity: BodySet::CAPACITY,
        });
    }
    Ok(())
}
