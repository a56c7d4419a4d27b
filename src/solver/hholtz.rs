//! # Helmholtz Solver
//!  Solve equations of the form:
//!
//!  (I - c * lap) psi = f
//!
//! on a sphere of radius R, with c >= 0. In spectral space every
//! coefficient of degree n is multiplied by
//!
//!  1 / (1 + c * n (n + 1) / R^2)
//!
//! The operator is positive definite, so the mean is kept.
use super::{laplacian_eigenvalue, Solve};
use crate::error::{Result, SphereError};
use crate::spectral::SpectralCoeffs;
use crate::transform::SphericalTransform;
use crate::Real;

/// Container for Hholtz
#[derive(Debug, Clone)]
pub struct Hholtz {
    truncation: usize,
    radius: Real,
    c: Real,
    factor: Vec<Real>,
}

impl Hholtz {
    /// Construct Helmholtz solver.
    ///
    /// Fails if `c` is negative or not finite.
    ///
    /// # Example
    /// ```
    /// use rustsht::{Hholtz, SpectralCoeffs, Solve};
    /// use num_complex::Complex;
    /// let hholtz = Hholtz::new(4, 1.0, 0.5).unwrap();
    /// let mut coeffs = SpectralCoeffs::one_hot(1, 1, 4, 2, 1, Complex::new(4., 0.)).unwrap();
    /// hholtz.solve_spectral(&mut coeffs).unwrap();
    /// assert!((coeffs.re[[0, 0, 2, 1]] - 1.).abs() < 1e-14);
    /// ```
    pub fn new(truncation: usize, radius: Real, c: Real) -> Result<Self> {
        if !(c.is_finite() && c >= 0.) {
            return Err(SphereError::invalid_config(format!(
                "helmholtz coefficient must be >= 0, got {}",
                c
            )));
        }
        let factor = (0..=truncation)
            .map(|n| 1. / (1. - c * laplacian_eigenvalue(n, radius)))
            .collect();
        Ok(Self {
            truncation,
            radius,
            c,
            factor,
        })
    }

    /// Construct Helmholtz solver from transform
    pub fn from_transform(sht: &SphericalTransform, c: Real) -> Result<Self> {
        Self::new(sht.truncation(), sht.grid().radius(), c)
    }

    /// Coefficient in front of the Laplacian
    pub fn c(&self) -> Real {
        self.c
    }
}

impl Solve for Hholtz {
    fn truncation(&self) -> usize {
        self.truncation
    }

    fn radius(&self) -> Real {
        self.radius
    }

    fn solve_spectral(&self, coeffs: &mut SpectralCoeffs) -> Result<()> {
        coeffs.check_truncation(self.truncation)?;
        let factor = &self.factor;
        coeffs.scale_degrees(|n| factor.get(n).copied());
        Ok(())
    }
}
