//! Configuration of the spectral transform engine.
use crate::error::{Result, SphereError};
use crate::field::Layout;
use crate::grid::EARTH_RADIUS;
use crate::Real;
use serde::{Deserialize, Serialize};

/// Configuration of a [`crate::SphericalTransform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Number of latitudes, pole to pole.
    pub nlat: usize,

    /// Number of longitudes.
    pub nlon: usize,

    /// Sphere radius in meters.
    pub radius: Real,

    /// Triangular truncation. Transforms are unavailable until set.
    pub truncation: Option<usize>,

    /// Size of a dedicated worker pool. Uses rayon's global pool if none.
    pub num_threads: Option<usize>,

    /// Memory order of fields returned by the backward transform.
    pub layout: Layout,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            nlat: 91,
            nlon: 180,
            radius: EARTH_RADIUS,
            truncation: None,
            num_threads: None,
            layout: Layout::TimeMajor,
        }
    }
}

impl TransformConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SHT_NLAT") {
            if let Ok(n) = val.parse() {
                config.nlat = n;
            }
        }

        if let Ok(val) = std::env::var("SHT_NLON") {
            if let Ok(n) = val.parse() {
                config.nlon = n;
            }
        }

        if let Ok(val) = std::env::var("SHT_RADIUS") {
            if let Ok(r) = val.parse() {
                config.radius = r;
            }
        }

        if let Ok(val) = std::env::var("SHT_TRUNCATION") {
            if let Ok(m) = val.parse() {
                config.truncation = Some(m);
            }
        }

        if let Ok(val) = std::env::var("SHT_THREADS") {
            if let Ok(n) = val.parse() {
                config.num_threads = Some(n);
            }
        }

        if let Ok(val) = std::env::var("SHT_LAYOUT") {
            if let Ok(layout) = val.parse() {
                config.layout = layout;
            }
        }

        config
    }

    /// Validate the configuration.
    ///
    /// The truncation is checked against `nlon / 2`; whether the grid
    /// itself is global is checked when it is built.
    pub fn validate(&self) -> Result<()> {
        if self.nlat < 3 {
            return Err(SphereError::invalid_config("nlat must be >= 3"));
        }

        if self.nlon < 4 {
            return Err(SphereError::invalid_config("nlon must be >= 4"));
        }

        if !(self.radius.is_finite() && self.radius > 0.) {
            return Err(SphereError::invalid_config("radius must be > 0"));
        }

        if let Some(m) = self.truncation {
            if m < 2 || m > self.nlon / 2 {
                return Err(SphereError::InvalidTruncation {
                    truncation: m,
                    max: self.nlon / 2,
                });
            }
        }

        if self.num_threads == Some(0) {
            return Err(SphereError::invalid_config("num_threads must be > 0"));
        }

        Ok(())
    }
}
