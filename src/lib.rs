//! Point-mass propagation under softened N-body gravity, thrust, and drag.
//!
//! The numerical core lives in the workspace crates and is re-exported here so
//! front-ends (the bundled binaries, or a host engine through [`host`]) share it.

pub mod host;
pub mod scenario;

pub use dopri_atmosphere as atmosphere;
pub use dopri_config as config;
pub use dopri_core::{constants, units, vector};
pub use dopri_dynamics as dynamics;
pub use dopri_export as export;
pub use dopri_orbits as orbits;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
