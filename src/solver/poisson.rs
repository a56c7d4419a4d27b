//! Poisson Solver
//! Solve equations of the form:
//! ..math:
//!  lap psi = f
//!
//! on a sphere of radius R. In spectral space the Laplacian is diagonal,
//! every coefficient of degree n is multiplied by -R^2 / (n (n + 1)).
//! The global mean (n = 0) lies in the null space and is set to zero.
use super::{laplacian_eigenvalue, Solve};
use crate::error::Result;
use crate::spectral::SpectralCoeffs;
use crate::transform::SphericalTransform;
use crate::Real;
use ndarray::s;

/// Container for Poisson Solver
#[derive(Debug, Clone)]
pub struct Poisson {
    truncation: usize,
    radius: Real,
    /// Inverse eigenvalue per degree, `None` for the null space
    factor: Vec<Option<Real>>,
}

impl Poisson {
    /// Poisson solver for truncation `truncation` on a sphere of `radius`
    pub fn new(truncation: usize, radius: Real) -> Self {
        let factor = (0..=truncation)
            .map(|n| match n {
                0 => None,
                _ => Some(1. / laplacian_eigenvalue(n, radius)),
            })
            .collect();
        Self {
            truncation,
            radius,
            factor,
        }
    }

    /// Construct Poisson solver from transform
    pub fn from_transform(sht: &SphericalTransform) -> Self {
        Self::new(sht.truncation(), sht.grid().radius())
    }

    /// Apply the Laplacian itself in spectral space
    pub fn apply_spectral(&self, coeffs: &mut SpectralCoeffs) -> Result<()> {
        coeffs.check_truncation(self.truncation)?;
        let radius = self.radius;
        coeffs.scale_degrees(|n| Some(laplacian_eigenvalue(n, radius)));
        Ok(())
    }
}

impl Solve for Poisson {
    fn truncation(&self) -> usize {
        self.truncation
    }

    fn radius(&self) -> Real {
        self.radius
    }

    /// Coefficients of degree `n` are multiplied by `-R^2 / (n (n + 1))`,
    /// the mean is zeroed.
    fn solve_spectral(&self, coeffs: &mut SpectralCoeffs) -> Result<()> {
        coeffs.check_truncation(self.truncation)?;
        let mean = coeffs
            .re
            .slice(s![.., .., 0, 0])
            .fold(0., |acc: Real, x| acc.max(x.abs()));
        if mean > 0. {
            tracing::debug!(mean, "dropped global mean of the forcing");
        }
        let factor = &self.factor;
        coeffs.scale_degrees(|n| factor.get(n).copied().flatten());
        Ok(())
    }
}
