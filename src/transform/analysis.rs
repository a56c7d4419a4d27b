//! Forward transform: physical space --> spherical harmonics
use super::SphericalTransform;
use crate::error::{Result, SphereError};
use crate::spectral::SpectralCoeffs;
use crate::Real;
use ndarray::prelude::*;
use ndarray::{Data, Zip};
use num_complex::Complex;

impl SphericalTransform {
    /// Transform gridded field `(time, level, lat, lon)` into triangular
    /// spectral coefficients `(time, level, n, m)`.
    ///
    /// Latitude and longitude extents must match the grid exactly.
    /// Every `(time, level)` slice is transformed independently, slices
    /// run in parallel.
    ///
    /// The field must be defined everywhere, undefined (missing) values
    /// are not detected and corrupt all coefficients of their slice.
    ///
    /// Along every latitude circle the zonal wavenumbers `m <= M` are
    /// obtained by an fft, afterwards the meridional integral is
    /// approximated by
    /// $$
    /// C_{nm} = \sum_j P_{nm}(\sin\phi_j) \\, \Delta\phi \cos\phi_j \\, F_m(\phi_j)
    /// $$
    /// The imaginary part of `m = 0` is set to zero, as it must
    /// vanish for a real field.
    pub fn analyze<S>(&self, field: &ArrayBase<S, Ix4>) -> Result<SpectralCoeffs>
    where
        S: Data<Elem = Real>,
    {
        let (nt, nz, ny, nx) = field.dim();
        if ny != self.grid.nlat() {
            return Err(SphereError::mismatch("latitude", self.grid.nlat(), ny));
        }
        if nx != self.grid.nlon() {
            return Err(SphereError::mismatch("longitude", self.grid.nlon(), nx));
        }
        tracing::trace!(slices = nt * nz, truncation = self.truncation(), "analyze");

        let size = self.truncation() + 1;
        let field = field.as_standard_layout();
        let slices = field.view().into_shape((nt * nz, ny, nx))?;
        let mut re = Array3::<Real>::zeros((nt * nz, size, size));
        let mut im = Array3::<Real>::zeros((nt * nz, size, size));
        self.install(|| {
            Zip::from(re.outer_iter_mut())
                .and(im.outer_iter_mut())
                .and(slices.outer_iter())
                .par_for_each(|mut re, mut im, v| {
                    self.analyze_slice(&v, &mut re, &mut im);
                });
        });

        Ok(SpectralCoeffs {
            re: re.into_shape((nt, nz, size, size))?,
            im: im.into_shape((nt, nz, size, size))?,
        })
    }

    /// Forward transform of a single horizontal slice
    fn analyze_slice(
        &self,
        v: &ArrayView2<Real>,
        re: &mut ArrayViewMut2<Real>,
        im: &mut ArrayViewMut2<Real>,
    ) {
        let size = self.truncation() + 1;
        let nx = self.grid.nlon();
        let mut buffer = vec![Complex::new(0., 0.); nx];

        // Fourier coefficients (lat, m)
        let mut fourier = Array2::<Complex<Real>>::zeros((v.nrows(), size));
        for (row, mut coef) in v.outer_iter().zip(fourier.outer_iter_mut()) {
            self.fourier.forward(&row, &mut coef, &mut buffer);
        }
        fourier
            .column_mut(0)
            .mapv_inplace(|c| Complex::new(c.re, 0.));
        if 2 * (size - 1) == nx {
            fourier
                .column_mut(size - 1)
                .mapv_inplace(|c| Complex::new(c.re, 0.));
        }

        // Legendre quadrature
        let p = &self.table.p;
        let w = &self.table.weights;
        for m in 0..size {
            let fm = fourier.column(m);
            for n in m..size {
                let mut sum = Complex::new(0., 0.);
                for (j, f) in fm.iter().enumerate() {
                    sum += *f * (p[[j, n, m]] * w[j]);
                }
                re[[n, m]] = sum.re;
                im[[n, m]] = sum.im;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::GlobalGrid;
    use crate::transform::SphereEngine;
    use crate::{SpectralCoeffs, SphereError, SphericalTransform};
    use ndarray::prelude::*;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    fn transform(nlat: usize, nlon: usize, truncation: usize) -> SphericalTransform {
        let grid = GlobalGrid::regular(nlat, nlon, 1.0).unwrap();
        SphereEngine::new(grid).set_truncation(truncation).unwrap()
    }

    fn approx_eq<S, D>(result: &ArrayBase<S, D>, expected: &ArrayBase<S, D>, dif: f64)
    where
        S: ndarray::Data<Elem = f64>,
        D: Dimension,
    {
        for (a, b) in expected.iter().zip(result.iter()) {
            if (a - b).abs() > dif {
                panic!("Large difference of values, got {} expected {}.", b, a)
            }
        }
    }

    #[test]
    fn test_constant_field() {
        // 2 degree grid, T45
        let sht = transform(91, 180, 45);
        let c = 3.5;
        let v = Array4::<f64>::from_elem((1, 1, 91, 180), c);
        let vhat = sht.analyze(&v).unwrap();

        // integral of a constant: c * sum(w) / sqrt(2)
        let expected = c * sht.table().weights.sum() * std::f64::consts::FRAC_1_SQRT_2;
        assert!((vhat.re[[0, 0, 0, 0]] - expected).abs() < 1e-10);
        assert!((vhat.re[[0, 0, 0, 0]] - c * 2f64.sqrt()).abs() < 1e-3 * c);
        for n in 1..=45 {
            for m in 0..=n {
                assert!(vhat.re[[0, 0, n, m]].abs() < 1e-2 * c, "n {} m {}", n, m);
                assert!(vhat.im[[0, 0, n, m]].abs() < 1e-12);
            }
        }
        for m in 1..=45 {
            assert_eq!(vhat.im[[0, 0, m, 0]], 0.);
        }

        // synthesis of the mean alone recovers the constant
        let mean = SpectralCoeffs::one_hot(
            1,
            1,
            45,
            0,
            0,
            num_complex::Complex::new(vhat.re[[0, 0, 0, 0]], 0.),
        )
        .unwrap();
        let w = sht.synthesize(&mean).unwrap();
        approx_eq(&w, &v, 1e-3 * c);
    }

    #[test]
    fn test_dimension_mismatch() {
        let sht = transform(19, 36, 6);
        let v = Array4::<f64>::zeros((1, 1, 18, 36));
        assert!(matches!(
            sht.analyze(&v),
            Err(SphereError::DimensionMismatch {
                expected: 19,
                found: 18,
                ..
            })
        ));
        let v = Array4::<f64>::zeros((1, 1, 19, 37));
        assert!(sht.analyze(&v).is_err());
    }

    #[test]
    fn test_linearity() {
        let sht = transform(37, 72, 12);
        let shape = (2, 3, 37, 72);
        let u = Array4::<f64>::random(shape, Uniform::new(-1., 1.));
        let v = Array4::<f64>::random(shape, Uniform::new(-1., 1.));
        let (a, b) = (2.5, -0.75);
        let lhs = sht.analyze(&(&u * a + &v * b)).unwrap();
        let uhat = sht.analyze(&u).unwrap();
        let vhat = sht.analyze(&v).unwrap();
        approx_eq(&lhs.re, &(&uhat.re * a + &vhat.re * b), 1e-10);
        approx_eq(&lhs.im, &(&uhat.im * a + &vhat.im * b), 1e-10);
    }

    #[test]
    fn test_slices_are_independent() {
        let sht = transform(19, 36, 8);
        let mut v = Array4::<f64>::random((2, 2, 19, 36), Uniform::new(-1., 1.));
        let before = sht.analyze(&v).unwrap();
        v.slice_mut(s![1, 0, .., ..]).fill(7.);
        let after = sht.analyze(&v).unwrap();
        for (t, z) in [(0usize, 0usize), (0, 1), (1, 1)].iter() {
            approx_eq(
                &after.re.slice(s![*t, *z, .., ..]),
                &before.re.slice(s![*t, *z, .., ..]),
                0.,
            );
        }
    }

    #[test]
    fn test_time_minor_input() {
        let sht = transform(19, 36, 8);
        let v = Array4::<f64>::random((2, 3, 19, 36), Uniform::new(-1., 1.));
        let mut v_f = Array4::<f64>::zeros((2, 3, 19, 36).f());
        v_f.assign(&v);
        let a = sht.analyze(&v).unwrap();
        let b = sht.analyze(&v_f).unwrap();
        approx_eq(&a.re, &b.re, 1e-14);
        approx_eq(&a.im, &b.im, 1e-14);
    }
}
