#![warn(missing_docs)]
//! # rustsht: spherical harmonic transforms on global grids
//!
//! Transforms real valued fields on a regular latitude-longitude grid
//! covering the whole sphere into triangular spherical harmonic
//! coefficients and back. Fields carry four dimensions,
//! `(time, level, lat, lon)`, every horizontal slice is transformed
//! independently and slices are processed in parallel.
//!
//! Spherical harmonics diagonalize the Laplacian on the sphere, so
//! elliptic equations such as
//! ```text
//! lap psi = f            (Poisson)
//! (I - c lap) psi = f    (Helmholtz)
//! ```
//! are solved by scaling coefficients in spectral space, see [`solver`].
//!
//! Conventions:
//! - Associated Legendre functions are normalized to
//!   `int_{-1}^{1} P_n^m(x)^2 dx = 2`, without Condon-Shortley phase.
//! - Zonal Fourier coefficients are scaled by `1 / nlon` in the forward
//!   direction.
//! - The meridional integral uses the weights `dlat * cos(lat)` of the
//!   regular grid.
pub mod bases;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod solver;
pub mod spectral;
pub mod transform;
pub use config::TransformConfig;
pub use error::{Result, SphereError};
pub use field::{GriddedField, Layout};
pub use grid::{GlobalGrid, EARTH_RADIUS};
pub use solver::{Hholtz, Poisson, Solve, Solver};
pub use spectral::SpectralCoeffs;
pub use transform::{SphereEngine, SphericalTransform};

/// Real type
pub type Real = f64;
