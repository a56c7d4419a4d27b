//! # Global grid
//!
//! Latitude/longitude sampling of a complete sphere. Latitudes run from
//! pole to pole with uniform spacing, longitudes are uniform and periodic
//! (the endpoint at 360 degree is not repeated).
//!
//! Every check on the domain happens here, at construction, so that
//! transforms never run on a grid that would produce silently wrong
//! spectral coefficients.
use crate::error::{Result, SphereError};
use crate::Real;
use ndarray::Array1;

/// Mean radius of the earth in meters
pub const EARTH_RADIUS: Real = 6.371e6;

/// Relative tolerance when checking spacing and coverage
const TOL: Real = 1e-6;

/// Immutable description of a global, periodic grid
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalGrid {
    /// Latitudes in degree, pole to pole
    lat: Array1<Real>,
    /// Longitudes in degree
    lon: Array1<Real>,
    /// Latitude spacing in radians (signed, negative if north to south)
    dlat: Real,
    /// Sphere radius
    radius: Real,
}

impl GlobalGrid {
    /// Regular grid from south to north pole, starting at longitude 0.
    ///
    /// # Example
    /// ```
    /// use rustsht::GlobalGrid;
    /// let grid = GlobalGrid::regular(91, 180, 1.0).unwrap();
    /// assert_eq!(grid.nlat(), 91);
    /// assert!((grid.lat()[45]).abs() < 1e-12);
    /// ```
    pub fn regular(nlat: usize, nlon: usize, radius: Real) -> Result<Self> {
        if nlat < 3 {
            return Err(SphereError::non_global(format!(
                "need at least 3 latitudes, got {}",
                nlat
            )));
        }
        let dy = 180. / (nlat - 1) as Real;
        let dx = 360. / nlon.max(1) as Real;
        let lat = Array1::from_shape_fn(nlat, |j| -90. + dy * j as Real);
        let lon = Array1::from_shape_fn(nlon, |i| dx * i as Real);
        Self::from_degrees(lat, lon, radius)
    }

    /// Grid from explicit coordinates in degree.
    ///
    /// Fails with [`SphereError::NonGlobalDomain`] if the latitudes do not
    /// span pole to pole with uniform spacing, or if the longitudes are not
    /// uniform and periodic.
    pub fn from_degrees(lat: Array1<Real>, lon: Array1<Real>, radius: Real) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.) {
            return Err(SphereError::invalid_config(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        if !lat.iter().chain(lon.iter()).all(|x| x.is_finite()) {
            return Err(SphereError::non_global("coordinates must be finite"));
        }
        let dlat = Self::check_latitudes(&lat)?;
        Self::check_longitudes(&lon)?;
        Ok(Self {
            lat,
            lon,
            dlat: dlat.to_radians(),
            radius,
        })
    }

    /// Returns spacing in degree
    fn check_latitudes(lat: &Array1<Real>) -> Result<Real> {
        let ny = lat.len();
        if ny < 3 {
            return Err(SphereError::non_global(format!(
                "need at least 3 latitudes, got {}",
                ny
            )));
        }
        let dy = (lat[ny - 1] - lat[0]) / (ny - 1) as Real;
        if !(((lat[ny - 1] - lat[0]).abs() - 180.).abs() <= 180. * TOL) {
            return Err(SphereError::non_global(format!(
                "latitudes span {} to {}, expected pole to pole",
                lat[0],
                lat[ny - 1]
            )));
        }
        for w in lat.windows(2) {
            if !(((w[1] - w[0]) - dy).abs() <= dy.abs() * TOL) {
                return Err(SphereError::non_global(format!(
                    "latitude spacing not uniform near {}",
                    w[0]
                )));
            }
        }
        Ok(dy)
    }

    fn check_longitudes(lon: &Array1<Real>) -> Result<()> {
        let nx = lon.len();
        if nx < 4 {
            return Err(SphereError::non_global(format!(
                "need at least 4 longitudes, got {}",
                nx
            )));
        }
        // ascending or descending, but never both
        let dx = (360. / nx as Real).copysign(lon[1] - lon[0]);
        for w in lon.windows(2) {
            if !(((w[1] - w[0]) - dx).abs() <= dx.abs() * TOL) {
                return Err(SphereError::non_global(format!(
                    "longitudes are not periodic with spacing {} near {}",
                    dx.abs(),
                    w[0]
                )));
            }
        }
        Ok(())
    }

    /// Number of latitudes (Y)
    pub fn nlat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitudes (X)
    pub fn nlon(&self) -> usize {
        self.lon.len()
    }

    /// Latitudes in degree
    pub fn lat(&self) -> &Array1<Real> {
        &self.lat
    }

    /// Longitudes in degree
    pub fn lon(&self) -> &Array1<Real> {
        &self.lon
    }

    /// Latitude spacing in radians
    pub fn dlat(&self) -> Real {
        self.dlat.abs()
    }

    /// Sphere radius
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Sine of every latitude
    pub fn sin_lat(&self) -> Array1<Real> {
        self.lat.mapv(|x| x.to_radians().sin())
    }

    /// Meridional quadrature weights `dlat * cos(lat)`
    pub fn weights(&self) -> Array1<Real> {
        let dlat = self.dlat();
        self.lat.mapv(|x| dlat * x.to_radians().cos())
    }
}
