//! # Fourier
//! Transform of a latitude circle from physical space to zonal
//! wavenumbers and back.
//!
//! The major workload is done by rustfft, which supports arbitrary
//! (mixed-radix) lengths. Plans are built once and are shared read-only
//! between worker threads.
use crate::Real;
use ndarray::{ArrayView1, ArrayViewMut1};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Planned forward and backward fft of fixed length
#[derive(Clone)]
pub struct FourierHandler {
    /// Number of longitudes
    pub n: usize,
    fft_forward: Arc<dyn Fft<Real>>,
    fft_backward: Arc<dyn Fft<Real>>,
}

impl fmt::Debug for FourierHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FourierHandler").field("n", &self.n).finish()
    }
}

impl FourierHandler {
    /// Plan transforms of length `n`.
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::<Real>::new();
        Self {
            n,
            fft_forward: planner.plan_fft_forward(n),
            fft_backward: planner.plan_fft_inverse(n),
        }
    }

    /// Physical space --> zonal wavenumbers `0..output.len()`
    ///
    /// Coefficients are normalized by `1 / n`, so a constant row
    /// yields its value at wavenumber 0. `buffer` must have length `n`.
    pub fn forward(
        &self,
        input: &ArrayView1<Real>,
        output: &mut ArrayViewMut1<Complex<Real>>,
        buffer: &mut [Complex<Real>],
    ) {
        debug_assert!(buffer.len() == self.n && input.len() == self.n);
        for (b, x) in buffer.iter_mut().zip(input.iter()) {
            *b = Complex::new(*x, 0.);
        }
        self.fft_forward.process(buffer);
        let norm = 1. / self.n as Real;
        for (o, b) in output.iter_mut().zip(buffer.iter()) {
            *o = *b * norm;
        }
    }

    /// Zonal wavenumbers `0..=M` --> physical space
    ///
    /// The truncated spectrum is expanded to a Hermitian spectrum of
    /// length `n`, position `n - i` holds the complex conjugate of
    /// wavenumber `i`. Only the real part of the inverse transform is kept.
    /// The imaginary parts of wavenumber 0 and of the Nyquist wavenumber
    /// (`n - i == i`) are ignored.
    pub fn backward(
        &self,
        input: &ArrayView1<Complex<Real>>,
        output: &mut ArrayViewMut1<Real>,
        buffer: &mut [Complex<Real>],
    ) {
        debug_assert!(buffer.len() == self.n && output.len() == self.n);
        debug_assert!(2 * (input.len() - 1) <= self.n);
        for b in buffer.iter_mut() {
            *b = Complex::new(0., 0.);
        }
        buffer[0] = Complex::new(input[0].re, 0.);
        for (i, c) in input.iter().enumerate().skip(1) {
            if self.n - i == i {
                buffer[i] = Complex::new(c.re, 0.);
            } else {
                buffer[i] = *c;
                buffer[self.n - i] = c.conj();
            }
        }
        self.fft_backward.process(buffer);
        for (o, b) in output.iter_mut().zip(buffer.iter()) {
            *o = b.re;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Ix1};
    use std::f64::consts::PI;

    fn approx_eq<S>(result: &ndarray::ArrayBase<S, Ix1>, expected: &ndarray::ArrayBase<S, Ix1>)
    where
        S: ndarray::Data<Elem = f64>,
    {
        let dif = 1e-10;
        for (a, b) in expected.iter().zip(result.iter()) {
            if (a - b).abs() > dif {
                panic!("Large difference of values, got {} expected {}.", b, a)
            }
        }
    }

    #[test]
    fn test_forward_cosine() {
        // mixed radix length
        let n = 90;
        let handler = FourierHandler::new(n);
        let x = Array1::from_shape_fn(n, |i| {
            let lam = 2. * PI * i as f64 / n as f64;
            2. + 3. * (2. * lam).cos() - 1.5 * (5. * lam).sin()
        });
        let mut out = Array1::<Complex<f64>>::zeros(8);
        let mut buffer = vec![Complex::new(0., 0.); n];
        handler.forward(&x.view(), &mut out.view_mut(), &mut buffer);
        assert!((out[0].re - 2.).abs() < 1e-12 && out[0].im.abs() < 1e-12);
        assert!((out[2].re - 1.5).abs() < 1e-12 && out[2].im.abs() < 1e-12);
        assert!(out[5].re.abs() < 1e-12 && (out[5].im - 0.75).abs() < 1e-12);
        assert!(out[3].norm() < 1e-12);
    }

    #[test]
    fn test_forward_backward() {
        let n = 36;
        let handler = FourierHandler::new(n);
        let x = Array1::from_shape_fn(n, |i| {
            let lam = 2. * PI * i as f64 / n as f64;
            0.5 + lam.cos() - 2. * (4. * lam).sin() + (18. * lam).cos()
        });
        let mut spec = Array1::<Complex<f64>>::zeros(n / 2 + 1);
        let mut y = Array1::<f64>::zeros(n);
        let mut buffer = vec![Complex::new(0., 0.); n];
        handler.forward(&x.view(), &mut spec.view_mut(), &mut buffer);
        handler.backward(&spec.view(), &mut y.view_mut(), &mut buffer);
        approx_eq(&y, &x);
    }
}
