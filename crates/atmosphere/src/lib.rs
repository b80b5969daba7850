//! Piecewise-exponential atmosphere and drag relative to a co-rotating air mass.

use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;

pub mod drag;
pub mod table;

pub use drag::{DragParams, PrimaryFrame, drag_acceleration};
pub use table::{DensityModel, DensitySample, REFERENCE_SAMPLES};

#[derive(Debug, Error, PartialEq)]
pub enum AtmosphereError {
    #[error("density table needs at least two samples, got {count}")]
    TooFewSamples { count: usize },
    #[error("density sample {index} is not a finite positive value ({density})")]
    InvalidDensity { index: usize, density: f64 },
    #[error("altitude must strictly increase at sample {index}")]
    NonIncreasingAltitude { index: usize },
    #[error("altitude spacing at sample {index} is {spacing_km} km, expected {expected_km} km")]
    NonUniformSpacing {
        index: usize,
        spacing_km: f64,
        expected_km: f64,
    },
    #[error("density must strictly decrease at sample {index} ({lower} -> {upper})")]
    NonDecreasingDensity { index: usize, lower: f64, upper: f64 },
    #[error("atmosphere scale height for band {band} is not finite and positive ({value})")]
    InvalidScaleHeight { band: usize, value: f64 },
    #[error("density scale must be finite and non-negative ({0})")]
    InvalidDensityScale(f64),
}

static DEFAULT_MODEL: OnceLock<Arc<DensityModel>> = OnceLock::new();
static INITIALIZE_LOCK: Mutex<()> = Mutex::new(());

/// Build the process-wide reference density model, or return it if already built.
///
/// Safe to call from several threads; the table is constructed exactly once and is
/// read-only afterwards.
pub fn init_default_model() -> Result<Arc<DensityModel>, AtmosphereError> {
    if let Some(model) = DEFAULT_MODEL.get() {
        return Ok(Arc::clone(model));
    }
    let _lock = INITIALIZE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(model) = DEFAULT_MODEL.get() {
        return Ok(Arc::clone(model));
    }
    let model = Arc::new(DensityModel::reference()?);
    log::info!(
        "initialised reference atmosphere ({} samples, ceiling {} km)",
        model.sample_count(),
        model.ceiling_altitude_km()
    );
    Ok(Arc::clone(DEFAULT_MODEL.get_or_init(|| model)))
}

/// The process-wide reference model, if [`init_default_model`] has already run.
pub fn default_model() -> Option<Arc<DensityModel>> {
    DEFAULT_MODEL.get().cloned()
}
