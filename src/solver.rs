//! # Spectral elliptic solvers
//!
//! Spherical harmonics are eigenfunctions of the Laplacian on the sphere,
//! $$
//! \nabla^2 Y_n^m = -\frac{n(n+1)}{R^2} Y_n^m,
//! $$
//! so elliptic operators built from the Laplacian are diagonal in
//! spectral space and are inverted by scaling every degree.
pub mod hholtz;
pub mod poisson;
pub use hholtz::Hholtz;
pub use poisson::Poisson;

use crate::error::{Result, SphereError};
use crate::field::GriddedField;
use crate::spectral::SpectralCoeffs;
use crate::transform::SphericalTransform;
use crate::Real;
use enum_dispatch::enum_dispatch;
use ndarray::{ArrayBase, Data, Ix4};

/// Eigenvalue of the Laplacian for spherical harmonics of degree `n`
pub fn laplacian_eigenvalue(n: usize, radius: Real) -> Real {
    let n = n as Real;
    -n * (n + 1.) / (radius * radius)
}

/// Solve linear systems which are diagonal in spectral space
#[enum_dispatch]
pub trait Solve {
    /// Truncation the solver was built for
    fn truncation(&self) -> usize;

    /// Sphere radius the solver was built for
    fn radius(&self) -> Real;

    /// Solve in spectral space, coefficients are overwritten.
    ///
    /// Fails with [`SphereError::DimensionMismatch`] if the coefficients
    /// do not match the truncation of the solver.
    fn solve_spectral(&self, coeffs: &mut SpectralCoeffs) -> Result<()>;

    /// Forward transform of `input`, solve, backward transform
    ///
    /// Truncation and radius of `sht` must match the solver.
    fn solve<S>(&self, sht: &SphericalTransform, input: &ArrayBase<S, Ix4>) -> Result<GriddedField>
    where
        S: Data<Elem = Real>,
    {
        if sht.truncation() != self.truncation() {
            return Err(SphereError::mismatch(
                "truncation",
                self.truncation(),
                sht.truncation(),
            ));
        }
        let radius = sht.grid().radius();
        if !((radius - self.radius()).abs() <= 1e-12 * self.radius()) {
            return Err(SphereError::invalid_config(format!(
                "solver radius {} differs from grid radius {}",
                self.radius(),
                radius
            )));
        }
        let mut coeffs = sht.analyze(input)?;
        self.solve_spectral(&mut coeffs)?;
        sht.synthesize(&coeffs)
    }
}

/// Collection of spectral solvers
#[enum_dispatch(Solve)]
#[derive(Debug, Clone)]
pub enum Solver {
    /// Laplace operator
    Poisson(Poisson),
    /// Laplace operator plus identity
    Hholtz(Hholtz),
}

impl SphericalTransform {
    /// Solve the Poisson equation `lap(psi) = forcing` on the sphere.
    ///
    /// The global mean (`n = 0`) of the solution is undetermined and set to
    /// zero.
    ///
    /// # Example
    /// ```
    /// use rustsht::{GlobalGrid, SphereEngine, SpectralCoeffs};
    /// use num_complex::Complex;
    /// let sht = SphereEngine::new(GlobalGrid::regular(37, 72, 1.0).unwrap())
    ///     .set_truncation(12)
    ///     .unwrap();
    /// let psi = sht
    ///     .synthesize(&SpectralCoeffs::one_hot(1, 1, 12, 3, 2, Complex::new(1., 0.)).unwrap())
    ///     .unwrap();
    /// let forcing = &psi * -12.;
    /// let solution = sht.invert_laplacian(&forcing).unwrap();
    /// for (a, b) in solution.iter().zip(psi.iter()) {
    ///     assert!((a - b).abs() < 1e-3);
    /// }
    /// ```
    pub fn invert_laplacian<S>(&self, forcing: &ArrayBase<S, Ix4>) -> Result<GriddedField>
    where
        S: Data<Elem = Real>,
    {
        Poisson::from_transform(self).solve(self, forcing)
    }

    /// Laplacian of a gridded field, evaluated in spectral space
    pub fn laplacian<S>(&self, field: &ArrayBase<S, Ix4>) -> Result<GriddedField>
    where
        S: Data<Elem = Real>,
    {
        let mut coeffs = self.analyze(field)?;
        Poisson::from_transform(self).apply_spectral(&mut coeffs)?;
        self.synthesize(&coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GlobalGrid;
    use crate::transform::SphereEngine;
    use num_complex::Complex;

    #[test]
    fn test_eigenvalue() {
        assert_eq!(laplacian_eigenvalue(0, 2.), 0.);
        assert_eq!(laplacian_eigenvalue(3, 2.), -3.);
    }

    #[test]
    fn test_solver_enum_dispatch() {
        let poisson = Poisson::new(4, 1.0);
        let solver = Solver::from(poisson.clone());
        let mut a = SpectralCoeffs::zeros(1, 1, 4);
        a.re.fill(1.);
        let mut b = a.clone();
        solver.solve_spectral(&mut a).unwrap();
        poisson.solve_spectral(&mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(solver.truncation(), 4);
    }

    #[test]
    fn test_solve_rejects_other_truncation() {
        let grid = GlobalGrid::regular(37, 72, 1.0).unwrap();
        let sht = SphereEngine::new(grid).set_truncation(12).unwrap();
        let forcing = sht
            .synthesize(&SpectralCoeffs::one_hot(1, 1, 12, 8, 3, Complex::new(1., 0.)).unwrap())
            .unwrap();
        let solver = Solver::from(Poisson::new(4, 1.0));
        assert!(matches!(
            solver.solve(&sht, &forcing),
            Err(SphereError::DimensionMismatch {
                expected: 4,
                found: 12,
                ..
            })
        ));
        let hholtz = Hholtz::new(4, 1.0, 0.5).unwrap();
        assert!(hholtz.solve(&sht, &forcing).is_err());

        let mut coeffs = sht.analyze(&forcing).unwrap();
        assert!(Poisson::new(4, 1.0).solve_spectral(&mut coeffs).is_err());
        assert!(hholtz.solve_spectral(&mut coeffs).is_err());
    }

    #[test]
    fn test_solve_rejects_other_radius() {
        let grid = GlobalGrid::regular(19, 36, 2.0).unwrap();
        let sht = SphereEngine::new(grid).set_truncation(6).unwrap();
        let forcing = ndarray::Array4::<f64>::zeros((1, 1, 19, 36));
        assert!(matches!(
            Poisson::new(6, 1.0).solve(&sht, &forcing),
            Err(SphereError::InvalidConfig(_))
        ));
        assert!(Poisson::from_transform(&sht).solve(&sht, &forcing).is_ok());
    }
}
