//! # Quadrature table
//! Normalized associated Legendre functions on every latitude of a
//! global grid, shared by the forward and backward transform.
use super::legendre::legendre;
use crate::grid::GlobalGrid;
use crate::Real;
use ndarray::prelude::*;
use ndarray::Zip;
use std::f64::consts::FRAC_1_SQRT_2;

/// `p[[j, n, m]]` holds the Legendre function of degree `n`, order `m`
/// at `sin(lat_j)`, scaled by `1 / sqrt(2)`.
///
/// The scaling makes the functions orthonormal on `[-1, 1]`, so the
/// forward and backward transform are consistent without further factors.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureTable {
    /// Triangular truncation
    pub truncation: usize,
    /// Legendre values `(nlat, truncation + 1, truncation + 1)`
    pub p: Array3<Real>,
    /// Meridional weights `dlat * cos(lat)`
    pub weights: Array1<Real>,
}

impl QuadratureTable {
    /// Build table for all latitudes of `grid`.
    ///
    /// Rows are computed in parallel.
    pub fn new(grid: &GlobalGrid, truncation: usize) -> Self {
        let size = truncation + 1;
        let mut p = Array3::<Real>::zeros((grid.nlat(), size, size));
        let mu = grid.sin_lat();
        Zip::from(p.outer_iter_mut())
            .and(&mu)
            .par_for_each(|mut pj, &mu| {
                pj.assign(&(legendre(truncation, mu) * FRAC_1_SQRT_2));
            });
        Self {
            truncation,
            p,
            weights: grid.weights(),
        }
    }

    /// Number of latitudes
    pub fn nlat(&self) -> usize {
        self.p.shape()[0]
    }
}
