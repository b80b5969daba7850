//! Configuration models and loaders for physics constants and propagation scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use dopri_core::constants::{
    DENSITY_SCALE, EARTH_RADIUS_KM, G_SIM, MAX_ACCELERATION, MIN_DISTANCE_SQ, OMEGA_EARTH,
    UNIT_TO_KM,
};
use serde::Deserialize;
use thiserror::Error;

/// Force-model constants. Every field defaults to the reference value.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: GravityConfig,
    pub primary: PrimaryConfig,
    pub atmosphere: AtmosphereConfig,
    pub drag: DragConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub gravitational_constant: f64,
    pub min_distance_sq: f64,
    pub max_acceleration: f64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SIM,
            min_distance_sq: MIN_DISTANCE_SQ,
            max_acceleration: MAX_ACCELERATION,
        }
    }
}

/// The body whose atmosphere produces drag.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PrimaryConfig {
    pub unit_to_km: f64,
    pub radius_km: f64,
    pub rotation_rate_rad_s: f64,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            unit_to_km: UNIT_TO_KM,
            radius_km: EARTH_RADIUS_KM,
            rotation_rate_rad_s: OMEGA_EARTH,
        }
    }
}

/// Atmosphere table overrides. `samples: None` selects the reference table.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub density_scale: f64,
    pub samples: Option<Vec<DensitySampleConfig>>,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            density_scale: DENSITY_SCALE,
            samples: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DensitySampleConfig {
    pub altitude_km: f64,
    pub density: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DragModeConfig {
    #[default]
    Inert,
    Applied,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DragConfig {
    pub mode: DragModeConfig,
}

/// A complete propagation run: force model, attracting bodies, craft, and step policy.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    pub craft: CraftConfig,
    pub integration: IntegrationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    pub position: [f64; 3],
    pub mass: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CraftConfig {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub mass: f64,
    #[serde(default)]
    pub drag_coefficient: f64,
    /// Cross-sectional area in simulation units².
    #[serde(default)]
    pub area: f64,
    /// Impulse applied every step (force × dt).
    #[serde(default)]
    pub thrust_impulse: [f64; 3],
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub dt: f64,
    pub steps: usize,
    #[serde(default = "default_sample_every")]
    pub sample_every: usize,
}

fn default_sample_every() -> usize {
    1
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ScenarioConfig {
    /// Reject step policies the runner cannot execute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dt = self.integration.dt;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "integration.dt",
                reason: format!("must be finite and positive, got {dt}"),
            });
        }
        if self.integration.sample_every == 0 {
            return Err(ConfigError::Invalid {
                field: "integration.sample_every",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.craft.mass.is_finite() {
            return Err(ConfigError::Invalid {
                field: "craft.mass",
                reason: format!("must be finite, got {}", self.craft.mass),
            });
        }
        Ok(())
    }
}

/// Load physics constants from a YAML or TOML file.
pub fn load_physics<P: AsRef<Path>>(path: P) -> Result<PhysicsConfig, ConfigError> {
    load_record(path)
}

/// Load and validate a single scenario from a YAML or TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let scenario: ScenarioConfig = load_record(path)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load scenarios from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let scenarios: Vec<ScenarioConfig> = load_records(path)?;
    for scenario in &scenarios {
        scenario.validate()?;
    }
    Ok(scenarios)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
