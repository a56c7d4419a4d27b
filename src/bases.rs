//! # Bases
//! Basis functions of the spherical harmonics, split into
//! their zonal (Fourier) and meridional (associated Legendre) part.
//!
//! Implemented:
//! - Fourier: planned real <-> complex fft along a latitude circle
//! - Legendre: normalized associated Legendre functions
//! - Quadrature: Legendre functions tabulated on every grid latitude
pub mod fourier;
pub mod legendre;
pub mod quadrature;
pub use fourier::FourierHandler;
pub use legendre::legendre;
pub use quadrature::QuadratureTable;
