//! Gravity, bounded attracting-body sets, and the seven-stage Dormand-Prince stepper.

pub mod bodies;
pub mod gravity;
pub mod stepper;
pub mod tableau;

pub use bodies::{AttractingBody, BodySet};
pub use gravity::GravityParams;
pub use stepper::{BodyState, DragMode, PhysicsModel, StepInputs, StepOutcome, step};

use thiserror::Error;

/// Rejected step inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("{count} attracting bodies exceed the capacity of {capacity}")]
    TooManyBodies { count: usize, capacity: usize },
    #[error("{positions} body positions supplied with {masses} masses")]
    LengthMismatch { positions: usize, masses: usize },
}
