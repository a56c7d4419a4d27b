//! Backward transform: spherical harmonics --> physical space
use super::SphericalTransform;
use crate::error::Result;
use crate::field::{GriddedField, Layout};
use crate::spectral::SpectralCoeffs;
use crate::Real;
use ndarray::prelude::*;
use ndarray::Zip;
use num_complex::Complex;

impl SphericalTransform {
    /// Transform triangular spectral coefficients `(time, level, n, m)`
    /// into a gridded field `(time, level, lat, lon)`.
    ///
    /// The returned field always covers the full grid of the transform,
    /// independent of the region the coefficients were obtained from.
    /// Time and level extents are taken from the coefficients.
    ///
    /// The imaginary part of `m = 0` is ignored.
    pub fn synthesize(&self, coeffs: &SpectralCoeffs) -> Result<GriddedField> {
        coeffs.check_truncation(self.truncation())?;
        let (nt, nz) = (coeffs.nt(), coeffs.nz());
        let (ny, nx) = (self.grid.nlat(), self.grid.nlon());
        let size = self.truncation() + 1;
        tracing::trace!(slices = nt * nz, truncation = self.truncation(), "synthesize");

        let re = coeffs.re.as_standard_layout();
        let re = re.view().into_shape((nt * nz, size, size))?;
        let im = coeffs.im.as_standard_layout();
        let im = im.view().into_shape((nt * nz, size, size))?;
        let mut v = Array3::<Real>::zeros((nt * nz, ny, nx));
        self.install(|| {
            Zip::from(v.outer_iter_mut())
                .and(re.outer_iter())
                .and(im.outer_iter())
                .par_for_each(|mut v, re, im| {
                    self.synthesize_slice(&re, &im, &mut v);
                });
        });

        let v = v.into_shape((nt, nz, ny, nx))?;
        Ok(match self.layout {
            Layout::TimeMajor => v,
            Layout::TimeMinor => {
                let mut out = self.layout.zeros([nt, nz, ny, nx]);
                out.assign(&v);
                out
            }
        })
    }

    /// Backward transform of a single horizontal slice
    fn synthesize_slice(
        &self,
        re: &ArrayView2<Real>,
        im: &ArrayView2<Real>,
        v: &mut ArrayViewMut2<Real>,
    ) {
        let size = self.truncation() + 1;
        let nx = self.grid.nlon();
        let p = &self.table.p;
        let mut buffer = vec![Complex::new(0., 0.); nx];
        let mut fourier = Array1::<Complex<Real>>::zeros(size);

        for (j, mut row) in v.outer_iter_mut().enumerate() {
            for (m, f) in fourier.iter_mut().enumerate() {
                let mut sum = Complex::new(0., 0.);
                for n in m..size {
                    sum += Complex::new(re[[n, m]], im[[n, m]]) * p[[j, n, m]];
                }
                *f = sum;
            }
            fourier[0].im = 0.;
            self.fourier.backward(&fourier.view(), &mut row, &mut buffer);
        }
    }
}
