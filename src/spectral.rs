//! # Spectral coefficients
//!
//! Triangular spherical harmonic expansion of a real valued field,
//! stored as a pair of real arrays `(time, level, n, m)` holding the real
//! and imaginary part. Only entries with `m <= n` are used, the rest
//! stays zero.
use crate::error::{Result, SphereError};
use crate::Real;
use ndarray::prelude::*;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Real and imaginary part of triangular spectral coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralCoeffs {
    /// Real part `(time, level, n, m)`
    pub re: Array4<Real>,
    /// Imaginary part `(time, level, n, m)`
    pub im: Array4<Real>,
}

impl SpectralCoeffs {
    /// Zero coefficients for `nt` times, `nz` levels and truncation `truncation`
    pub fn zeros(nt: usize, nz: usize, truncation: usize) -> Self {
        let shape = (nt, nz, truncation + 1, truncation + 1);
        Self {
            re: Array4::zeros(shape),
            im: Array4::zeros(shape),
        }
    }

    /// Single spherical harmonic of degree `n` and order `m` in every slice
    ///
    /// Fails with [`SphereError::DimensionMismatch`] unless
    /// `m <= n <= truncation`.
    ///
    /// # Example
    /// ```
    /// use rustsht::SpectralCoeffs;
    /// use num_complex::Complex;
    /// let c = SpectralCoeffs::one_hot(1, 1, 5, 3, 2, Complex::new(1., 0.5)).unwrap();
    /// assert_eq!(c.get(0, 0, 3, 2), Complex::new(1., 0.5));
    /// assert_eq!(c.get(0, 0, 3, 1), Complex::new(0., 0.));
    /// assert!(SpectralCoeffs::one_hot(1, 1, 5, 3, 4, Complex::new(1., 0.)).is_err());
    /// ```
    pub fn one_hot(
        nt: usize,
        nz: usize,
        truncation: usize,
        n: usize,
        m: usize,
        value: Complex<Real>,
    ) -> Result<Self> {
        if n > truncation {
            return Err(SphereError::mismatch("degree n", truncation, n));
        }
        if m > n {
            return Err(SphereError::mismatch("order m", n, m));
        }
        let mut coeffs = Self::zeros(nt, nz, truncation);
        coeffs.re.slice_mut(s![.., .., n, m]).fill(value.re);
        coeffs.im.slice_mut(s![.., .., n, m]).fill(value.im);
        Ok(coeffs)
    }

    /// Number of time steps
    pub fn nt(&self) -> usize {
        self.re.shape()[0]
    }

    /// Number of levels
    pub fn nz(&self) -> usize {
        self.re.shape()[1]
    }

    /// Triangular truncation
    pub fn truncation(&self) -> usize {
        self.re.shape()[2].saturating_sub(1)
    }

    /// Complex coefficient of degree `n` and order `m`
    pub fn get(&self, t: usize, z: usize, n: usize, m: usize) -> Complex<Real> {
        Complex::new(self.re[[t, z, n, m]], self.im[[t, z, n, m]])
    }

    /// Set complex coefficient of degree `n` and order `m`
    pub fn set(&mut self, t: usize, z: usize, n: usize, m: usize, value: Complex<Real>) {
        self.re[[t, z, n, m]] = value.re;
        self.im[[t, z, n, m]] = value.im;
    }

    /// Check that both parts are triangular arrays of `truncation`
    pub fn check_truncation(&self, truncation: usize) -> Result<()> {
        const AXES: [&str; 4] = ["time", "level", "degree n", "order m"];
        let mismatch = self
            .re
            .shape()
            .iter()
            .zip(self.im.shape())
            .zip(AXES.iter())
            .find(|((re, im), _)| re != im);
        if let Some(((re, im), axis)) = mismatch {
            return Err(SphereError::mismatch(*axis, *re, *im));
        }
        let size = truncation + 1;
        if self.re.shape()[2] != size {
            return Err(SphereError::mismatch("degree n", size, self.re.shape()[2]));
        }
        if self.re.shape()[3] != size {
            return Err(SphereError::mismatch("order m", size, self.re.shape()[3]));
        }
        Ok(())
    }

    /// Multiply all coefficients of degree `n` by `factor(n)`.
    ///
    /// Degrees for which `factor` returns `None` are set to zero.
    pub fn scale_degrees<F>(&mut self, factor: F)
    where
        F: Fn(usize) -> Option<Real>,
    {
        for n in 0..self.re.shape()[2] {
            let f = factor(n).unwrap_or(0.);
            self.re.slice_mut(s![.., .., n, ..]).mapv_inplace(|x| x * f);
            self.im.slice_mut(s![.., .., n, ..]).mapv_inplace(|x| x * f);
        }
    }

    /// Variance contained in every total wavenumber, returns `(time, level, n)`.
    ///
    /// $$
    /// E_n = \frac{1}{2} \left( |C_{n0}|^2 + 2 \sum_{m \geq 1} |C_{nm}|^2 \right)
    /// $$
    ///
    /// Summed over all degrees, this equals the area weighted mean of the
    /// squared field.
    pub fn degree_variance(&self) -> Array3<Real> {
        let (nt, nz, nn, nm) = self.re.dim();
        let mut energy = Array3::<Real>::zeros((nt, nz, nn));
        for ((t, z, n), e) in energy.indexed_iter_mut() {
            let mut sum = 0.;
            for m in 0..nm.min(n + 1) {
                let c = self.re[[t, z, n, m]].powi(2) + self.im[[t, z, n, m]].powi(2);
                sum += if m == 0 { c } else { 2. * c };
            }
            *e = 0.5 * sum;
        }
        energy
    }
}
