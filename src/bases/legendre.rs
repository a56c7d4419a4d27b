//! # Associated Legendre functions
//! Latitude dependent factor of the spherical harmonics.
//!
//! The functions are normalized such that
//! $$
//! \int_{-1}^{1} \left(P_n^m(\mu)\right)^2 d\mu = 2
//! $$
//! for every degree *n* and order *m*, without Condon-Shortley phase.
//! They are generated by the sectoral recurrence in *m*, followed by the
//! three-term recurrence in *n*, which is stable up to high degrees.
use crate::Real;
use ndarray::prelude::*;

/// Associated Legendre functions up to degree `truncation` at `mu`.
///
/// Returns a triangular array `p[[n, m]]` of shape
/// `(truncation + 1, truncation + 1)`, entries with `m > n` are zero.
/// `mu` is usually the sine of latitude and is clamped to `[-1, 1]`.
///
/// # Example
/// ```
/// use rustsht::bases::legendre;
/// let p = legendre(2, 0.5);
/// assert!((p[[0, 0]] - 1.).abs() < 1e-12);
/// assert!((p[[1, 0]] - 3f64.sqrt() * 0.5).abs() < 1e-12);
/// assert_eq!(p[[1, 2]], 0.);
/// ```
pub fn legendre(truncation: usize, mu: Real) -> Array2<Real> {
    let mu = mu.max(-1.).min(1.);
    let nu = (1. - mu * mu).max(0.).sqrt();
    let size = truncation + 1;
    let mut p = Array2::<Real>::zeros((size, size));

    // Sectoral: P_m^m
    p[[0, 0]] = 1.;
    for m in 1..size {
        let fm = m as Real;
        p[[m, m]] = ((2. * fm + 1.) / (2. * fm)).sqrt() * nu * p[[m - 1, m - 1]];
    }

    for m in 0..size {
        let fm = m as Real;
        if m + 1 < size {
            p[[m + 1, m]] = (2. * fm + 3.).sqrt() * mu * p[[m, m]];
        }
        for n in m + 2..size {
            let fn_ = n as Real;
            let a = ((4. * fn_ * fn_ - 1.) / (fn_ * fn_ - fm * fm)).sqrt();
            let b = (((fn_ - 1.) * (fn_ - 1.) - fm * fm) / (4. * (fn_ - 1.) * (fn_ - 1.) - 1.)).sqrt();
            p[[n, m]] = a * (mu * p[[n - 1, m]] - b * p[[n - 2, m]]);
        }
    }
    p
}
