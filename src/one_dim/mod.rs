//! Special cases for one-dimensional curves, which can use a much smaller
//! coefficient system than the 2D caches and share their evaluation pattern.

pub mod cubic;
pub mod linear;

pub use cubic::CubicCache1D;
pub use linear::LinearCache1D;

use crate::axis::check_knots;
use crate::condition::sort::sort_axis;
use crate::CacheError;

/// Sort knots ascending, carry the values along, and validate both.
pub(crate) fn sort_curve(x: &[f64], y: &[f64], min: usize) -> Result<(Vec<f64>, Vec<f64>), CacheError> {
    if y.len() != x.len() {
        return Err(CacheError::DimensionMismatch {
            what: "y",
            expected: x.len(),
            got: y.len(),
        });
    }
    if let Some(idx) = y.iter().position(|v| !v.is_finite()) {
        return Err(CacheError::NonFinite { what: "y", idx });
    }
    let (xs, perm) = sort_axis("x", x)?;
    check_knots("x", &xs, min)?;
    let ys = perm.iter().map(|&k| y[k]).collect();
    Ok((xs, ys))
}
