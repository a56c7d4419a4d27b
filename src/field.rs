//! # Gridded fields
//!
//! A gridded field is a logical 4-D array indexed by
//! `(time, level, latitude, longitude)`. Every `(time, level)` pair is an
//! independent horizontal slice.
//!
//! The wider diagnostics codebase stores fields either time-major
//! (row-major) or time-minor (column-major). Both are the same logical
//! array, so transforms only index logically and [`Layout`] is consulted
//! solely when a new field is allocated.
use crate::error::{Result, SphereError};
use crate::Real;
use ndarray::prelude::*;
use ndarray::{Data, ShapeBuilder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Owned gridded field `(time, level, latitude, longitude)`.
pub type GriddedField = Array4<Real>;

/// Physical memory order of newly allocated fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Row-major, longitude varies fastest
    TimeMajor,
    /// Column-major, time varies fastest
    TimeMinor,
}

impl Default for Layout {
    fn default() -> Self {
        Self::TimeMajor
    }
}

impl FromStr for Layout {
    type Err = SphereError;

    /// Parse from a case insensitive name
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "timemajor" | "time-major" | "time_major" | "c" => Ok(Self::TimeMajor),
            "timeminor" | "time-minor" | "time_minor" | "f" | "fortran" => Ok(Self::TimeMinor),
            _ => Err(SphereError::invalid_config(format!("unknown layout {}", s))),
        }
    }
}

impl Layout {
    /// Allocate a zeroed field with this memory order
    ///
    /// # Example
    /// ```
    /// use rustsht::field::Layout;
    /// let v = Layout::TimeMinor.zeros([2, 3, 4, 5]);
    /// assert_eq!(v.shape(), &[2, 3, 4, 5]);
    /// assert_eq!(v.strides()[0], 1);
    /// ```
    pub fn zeros(&self, shape: [usize; 4]) -> GriddedField {
        match self {
            Self::TimeMajor => Array4::zeros(shape),
            Self::TimeMinor => Array4::zeros(shape.f()),
        }
    }

    /// Layout of an existing array, `None` if it is neither
    /// contiguous row- nor column-major.
    pub fn of<S: Data<Elem = Real>>(field: &ArrayBase<S, Ix4>) -> Option<Self> {
        if field.is_standard_layout() {
            Some(Self::TimeMajor)
        } else if field.t().is_standard_layout() {
            Some(Self::TimeMinor)
        } else {
            None
        }
    }
}

/// Area weighted mean of every horizontal slice, returns `(time, level)`.
///
/// `weights` are the latitude quadrature weights of the grid, one per
/// latitude of the field.
pub fn area_mean<S: Data<Elem = Real>>(
    field: &ArrayBase<S, Ix4>,
    weights: &Array1<Real>,
) -> Result<Array2<Real>> {
    let (nt, nz, ny, nx) = field.dim();
    if weights.len() != ny {
        return Err(SphereError::mismatch("latitude", ny, weights.len()));
    }
    let total = weights.sum() * nx as Real;
    let mut mean = Array2::<Real>::zeros((nt, nz));
    for ((t, z), m) in mean.indexed_iter_mut() {
        let slice = field.slice(s![t, z, .., ..]);
        *m = slice.sum_axis(Axis(1)).dot(weights) / total;
    }
    Ok(mean)
}
