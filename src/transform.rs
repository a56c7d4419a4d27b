//! # Spherical harmonic transform
//!
//! Forward transform (analysis) of a gridded global field into triangular
//! spherical harmonic coefficients and backward transform (synthesis) of
//! coefficients into a gridded field.
//!
//! Setting up a transform is split in two steps. A [`SphereEngine`] knows
//! the grid, but offers no transforms. Choosing a truncation with
//! [`SphereEngine::set_truncation`] tabulates the Legendre functions and
//! returns a [`SphericalTransform`], so a transform without truncation
//! cannot exist.
//!
//! # Example
//! ```
//! use rustsht::{GlobalGrid, SphereEngine};
//! use ndarray::Array4;
//! let grid = GlobalGrid::regular(19, 36, 1.0).unwrap();
//! let sht = SphereEngine::new(grid).set_truncation(6).unwrap();
//! let v = Array4::<f64>::from_elem((1, 1, 19, 36), 2.0);
//! let vhat = sht.analyze(&v).unwrap();
//! let w = sht.synthesize(&vhat).unwrap();
//! assert_eq!(w.shape(), &[1, 1, 19, 36]);
//! ```
pub mod analysis;
pub mod synthesis;
use crate::bases::{FourierHandler, QuadratureTable};
use crate::config::TransformConfig;
use crate::error::{Result, SphereError};
use crate::field::Layout;
use crate::grid::GlobalGrid;
use rayon::ThreadPool;
use std::sync::Arc;

/// Global grid without truncation
#[derive(Debug, Clone)]
pub struct SphereEngine {
    grid: GlobalGrid,
    layout: Layout,
    pool: Option<Arc<ThreadPool>>,
}

impl SphereEngine {
    /// Engine on a global grid.
    ///
    /// Slices are processed on rayon's global pool.
    pub fn new(grid: GlobalGrid) -> Self {
        Self {
            grid,
            layout: Layout::default(),
            pool: None,
        }
    }

    /// Memory order of fields returned by the backward transform
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Process slices on a dedicated pool of `num_threads` workers
    pub fn with_threads(mut self, num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;
        tracing::debug!(num_threads, "built worker pool");
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    /// Underlying grid
    pub fn grid(&self) -> &GlobalGrid {
        &self.grid
    }

    /// Choose triangular truncation, must lie within `[2, nlon / 2]`.
    ///
    /// # Example
    /// ```
    /// use rustsht::{GlobalGrid, SphereEngine};
    /// let engine = SphereEngine::new(GlobalGrid::regular(19, 36, 1.0).unwrap());
    /// assert!(engine.set_truncation(1).is_err());
    /// assert!(engine.set_truncation(18).is_ok());
    /// ```
    pub fn set_truncation(&self, truncation: usize) -> Result<SphericalTransform> {
        check_truncation(&self.grid, truncation)?;
        let table = build_table(&self.grid, truncation, self.pool.as_deref());
        Ok(SphericalTransform {
            fourier: FourierHandler::new(self.grid.nlon()),
            grid: self.grid.clone(),
            layout: self.layout,
            pool: self.pool.clone(),
            table,
        })
    }
}

/// Spherical harmonic transform of fixed grid and truncation
#[derive(Debug, Clone)]
pub struct SphericalTransform {
    grid: GlobalGrid,
    layout: Layout,
    pool: Option<Arc<ThreadPool>>,
    table: QuadratureTable,
    fourier: FourierHandler,
}

impl SphericalTransform {
    /// Build grid, worker pool and quadrature table from configuration.
    ///
    /// Fails with [`SphereError::TruncationNotSet`] if no truncation is
    /// configured.
    pub fn from_config(config: &TransformConfig) -> Result<Self> {
        config.validate()?;
        let truncation = config.truncation.ok_or(SphereError::TruncationNotSet)?;
        let grid = GlobalGrid::regular(config.nlat, config.nlon, config.radius)?;
        let mut engine = SphereEngine::new(grid).with_layout(config.layout);
        if let Some(num_threads) = config.num_threads {
            engine = engine.with_threads(num_threads)?;
        }
        engine.set_truncation(truncation)
    }

    /// Replace truncation and rebuild the quadrature table.
    ///
    /// On failure the previous truncation stays in place.
    pub fn set_truncation(&mut self, truncation: usize) -> Result<()> {
        check_truncation(&self.grid, truncation)?;
        self.table = build_table(&self.grid, truncation, self.pool.as_deref());
        Ok(())
    }

    /// Triangular truncation
    pub fn truncation(&self) -> usize {
        self.table.truncation
    }

    /// Underlying grid
    pub fn grid(&self) -> &GlobalGrid {
        &self.grid
    }

    /// Tabulated Legendre functions
    pub fn table(&self) -> &QuadratureTable {
        &self.table
    }

    /// Memory order of fields returned by the backward transform
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Engine without truncation on the same grid
    pub fn engine(&self) -> SphereEngine {
        SphereEngine {
            grid: self.grid.clone(),
            layout: self.layout,
            pool: self.pool.clone(),
        }
    }

    /// Run `op` on the dedicated pool, if any
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn check_truncation(grid: &GlobalGrid, truncation: usize) -> Result<()> {
    let max = grid.nlon() / 2;
    if truncation < 2 || truncation > max {
        return Err(SphereError::InvalidTruncation { truncation, max });
    }
    Ok(())
}

fn build_table(grid: &GlobalGrid, truncation: usize, pool: Option<&ThreadPool>) -> QuadratureTable {
    let table = match pool {
        Some(pool) => pool.install(|| QuadratureTable::new(grid, truncation)),
        None => QuadratureTable::new(grid, truncation),
    };
    tracing::debug!(
        truncation,
        nlat = grid.nlat(),
        nlon = grid.nlon(),
        "built quadrature table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;

    fn engine(nlat: usize, nlon: usize) -> SphereEngine {
        SphereEngine::new(GlobalGrid::regular(nlat, nlon, 1.0).unwrap())
    }

    #[test]
    fn test_truncation_bounds() {
        let engine = engine(91, 180);
        assert!(matches!(
            engine.set_truncation(1),
            Err(SphereError::InvalidTruncation { truncation: 1, max: 90 })
        ));
        assert!(matches!(
            engine.set_truncation(91),
            Err(SphereError::InvalidTruncation { truncation: 91, max: 90 })
        ));
        assert_eq!(engine.set_truncation(2).unwrap().truncation(), 2);
        assert_eq!(engine.set_truncation(90).unwrap().truncation(), 90);
    }

    #[test]
    fn test_failed_truncation_keeps_table() {
        let mut sht = engine(19, 36).set_truncation(6).unwrap();
        let before = sht.table().clone();
        assert!(sht.set_truncation(19).is_err());
        assert_eq!(sht.truncation(), 6);
        assert_eq!(sht.table(), &before);
        sht.set_truncation(9).unwrap();
        assert_eq!(sht.table().p.shape(), &[19, 10, 10]);
    }

    #[test]
    fn test_set_truncation_idempotent() {
        let mut sht = engine(19, 36).set_truncation(6).unwrap();
        let first = sht.table().clone();
        sht.set_truncation(6).unwrap();
        assert_eq!(sht.table(), &first);
    }

    #[test]
    fn test_from_config() {
        let config = TransformConfig {
            nlat: 19,
            nlon: 36,
            radius: 1.0,
            truncation: Some(8),
            num_threads: Some(2),
            layout: Layout::TimeMinor,
        };
        let sht = SphericalTransform::from_config(&config).unwrap();
        assert_eq!(sht.truncation(), 8);
        assert_eq!(sht.layout(), Layout::TimeMinor);
        assert_eq!(sht.grid().nlon(), 36);
    }

    #[test]
    fn test_from_config_without_truncation() {
        let config = TransformConfig {
            nlat: 19,
            nlon: 36,
            ..Default::default()
        };
        assert!(matches!(
            SphericalTransform::from_config(&config),
            Err(SphereError::TruncationNotSet)
        ));
    }
}
