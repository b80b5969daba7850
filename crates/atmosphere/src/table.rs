//! Tabulated density samples and exponential interpolation between them.

use dopri_core::constants::DENSITY_SCALE;

use crate::AtmosphereError;

/// Below this altitude the interpolated density is capped instead of scaled.
pub const LOW_ALTITUDE_LIMIT_KM: f64 = 130.0;
/// Upper bound on the interpolated density inside the low-altitude band.
pub const LOW_ALTITUDE_DENSITY_CAP: f64 = 1e4;

/// One altitude/density pair of the sample table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySample {
    pub altitude_km: f64,
    pub density: f64,
}

const fn sample(altitude_km: f64, density: f64) -> DensitySample {
    DensitySample {
        altitude_km,
        density,
    }
}

/// Reference 0-500 km table at 10 km spacing, densities in kg/km³.
///
/// The 200-240 km entries are a log-linear bridge between the 190 km and 250 km
/// samples so that density strictly decreases with altitude.
pub const REFERENCE_SAMPLES: [DensitySample; 51] = [
    sample(0.0, 1.35e9),
    sample(10.0, 4.56e8),
    sample(20.0, 9.82e7),
    sample(30.0, 2.05e7),
    sample(40.0, 4.46e6),
    sample(50.0, 1.15e6),
    sample(60.0, 3.48e5),
    sample(70.0, 9.11e4),
    sample(80.0, 2.06e4),
    sample(90.0, 3.81e3),
    sample(100.0, 725.0),
    sample(110.0, 267.0),
    sample(120.0, 107.0),
    sample(130.0, 51.0),
    sample(140.0, 10.0),
    sample(150.0, 1.95),
    sample(160.0, 1.15),
    sample(170.0, 0.68),
    sample(180.0, 0.40),
    sample(190.0, 0.24),
    sample(200.0, 0.2302),
    sample(210.0, 0.2208),
    sample(220.0, 0.2118),
    sample(230.0, 0.2032),
    sample(240.0, 0.1949),
    sample(250.0, 0.187),
    sample(260.0, 0.1459),
    sample(270.0, 0.1136),
    sample(280.0, 0.0885),
    sample(290.0, 0.0689),
    sample(300.0, 0.0537),
    sample(310.0, 0.0418),
    sample(320.0, 0.0326),
    sample(330.0, 0.0254),
    sample(340.0, 0.0198),
    sample(350.0, 0.0154),
    sample(360.0, 0.0120),
    sample(370.0, 0.00938),
    sample(380.0, 0.0073),
    sample(390.0, 0.00568),
    sample(400.0, 0.00487),
    sample(410.0, 0.00378),
    sample(420.0, 0.00292),
    sample(430.0, 0.00232),
    sample(440.0, 0.00197),
    sample(450.0, 0.00168),
    sample(460.0, 0.00138),
    sample(470.0, 0.00106),
    sample(480.0, 0.000803),
    sample(490.0, 0.000622),
    sample(500.0, 0.000485),
];

/// Validated density table with one precomputed scale height per band.
#[derive(Debug, Clone)]
pub struct DensityModel {
    altitudes_km: Vec<f64>,
    densities: Vec<f64>,
    scale_heights_km: Vec<f64>,
    band_width_km: f64,
    density_scale: f64,
}

impl DensityModel {
    /// Build a model from uniformly spaced samples using the reference density scale.
    pub fn new(samples: &[DensitySample]) -> Result<Self, AtmosphereError> {
        Self::with_density_scale(samples, DENSITY_SCALE)
    }

    /// Build the model from [`REFERENCE_SAMPLES`].
    pub fn reference() -> Result<Self, AtmosphereError> {
        Self::new(&REFERENCE_SAMPLES)
    }

    /// Build a model, scaling densities above the low-altitude band by `density_scale`.
    ///
    /// Fails unless altitudes strictly increase at a uniform spacing and densities are
    /// positive and strictly decreasing, so every scale height is finite and positive.
    pub fn with_density_scale(
        samples: &[DensitySample],
        density_scale: f64,
    ) -> Result<Self, AtmosphereError> {
        if samples.len() < 2 {
            return Err(AtmosphereError::TooFewSamples {
                count: samples.len(),
            });
        }
        if !density_scale.is_finite() || density_scale < 0.0 {
            return Err(AtmosphereError::InvalidDensityScale(density_scale));
        }
        for (index, s) in samples.iter().enumerate() {
            if !s.density.is_finite() || s.density <= 0.0 {
                return Err(AtmosphereError::InvalidDensity {
                    index,
                    density: s.density,
                });
            }
        }

        let band_width_km = samples[1].altitude_km - samples[0].altitude_km;
        let mut scale_heights_km = Vec::with_capacity(samples.len() - 1);
        for (band, pair) in samples.windows(2).enumerate() {
            let (lower, upper) = (pair[0], pair[1]);
            let dh = upper.altitude_km - lower.altitude_km;
            if dh.is_nan() || dh <= 0.0 {
                return Err(AtmosphereError::NonIncreasingAltitude { index: band + 1 });
            }
            if (dh - band_width_km).abs() > 1e-9 * band_width_km {
                return Err(AtmosphereError::NonUniformSpacing {
                    index: band + 1,
                    spacing_km: dh,
                    expected_km: band_width_km,
                });
            }
            if upper.density >= lower.density {
                return Err(AtmosphereError::NonDecreasingDensity {
                    index: band + 1,
                    lower: lower.density,
                    upper: upper.density,
                });
            }
            let h = -dh / (upper.density / lower.density).ln();
            if !h.is_finite() || h <= 0.0 {
                return Err(AtmosphereError::InvalidScaleHeight { band, value: h });
            }
            scale_heights_km.push(h);
        }

        log::debug!(
            "built density model: {} samples, {} km bands, scale {}",
            samples.len(),
            band_width_km,
            density_scale
        );

        Ok(Self {
            altitudes_km: samples.iter().map(|s| s.altitude_km).collect(),
            densities: samples.iter().map(|s| s.density).collect(),
            scale_heights_km,
            band_width_km,
            density_scale,
        })
    }

    /// Density at `altitude_km`, in the units of the sample table.
    ///
    /// At or below the first sample the first density is returned as-is; at or above
    /// the last sample the atmosphere is vacuum.
    pub fn density(&self, altitude_km: f64) -> f64 {
        let last = self.altitudes_km.len() - 1;
        if altitude_km <= self.altitudes_km[0] {
            return self.densities[0];
        }
        if altitude_km >= self.altitudes_km[last] {
            return 0.0;
        }

        let offset = altitude_km - self.altitudes_km[0];
        let band = ((offset / self.band_width_km) as usize).min(last - 1);
        let dh = altitude_km - self.altitudes_km[band];
        let rho = self.densities[band] * (-dh / self.scale_heights_km[band]).exp();
        if altitude_km < LOW_ALTITUDE_LIMIT_KM {
            // the exponential fit overshoots in the lowest bands
            rho.min(LOW_ALTITUDE_DENSITY_CAP)
        } else {
            rho * self.density_scale
        }
    }

    pub fn scale_heights_km(&self) -> &[f64] {
        &self.scale_heights_km
    }

    pub fn sample_count(&self) -> usize {
        self.altitudes_km.len()
    }

    pub fn band_width_km(&self) -> f64 {
        self.band_width_km
    }

    pub fn density_scale(&self) -> f64 {
        self.density_scale
    }

    pub fn floor_altitude_km(&self) -> f64 {
        self.altitudes_km[0]
    }

    /// Altitude at and above which the model returns vacuum.
    pub fn ceiling_altitude_km(&self) -> f64 {
        self.altitudes_km[self.altitudes_km.len() - 1]
    }

    pub fn surface_density(&self) -> f64 {
        self.densities[0]
    }
}
