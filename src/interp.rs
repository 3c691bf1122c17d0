//! Evaluation interfaces shared by every cache kind.
//!
//! Caches only store coefficients; evaluation blends the coefficients of the cell
//! containing the observation point with the cache's constant basis matrix.
use ndarray::Array2;

use crate::basis::weights;
use crate::CacheError;

/// A one-dimensional interpolant.
pub trait Interp1D {
    /// Evaluate the interpolant at an observation point.
    fn eval_one(&self, loc: f64) -> Result<f64, CacheError>;

    /// Evaluate the interpolant at a set of observation points.
    #[inline]
    fn eval(&self, locs: &[f64], out: &mut [f64]) -> Result<(), CacheError> {
        if locs.len() != out.len() {
            return Err(CacheError::DimensionMismatch {
                what: "output",
                expected: locs.len(),
                got: out.len(),
            });
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i])?;
        }

        Ok(())
    }

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn eval_alloc(&self, locs: &[f64]) -> Result<Vec<f64>, CacheError> {
        let mut out = vec![0.0; locs.len()];
        self.eval(locs, &mut out)?;
        Ok(out)
    }
}

/// A two-dimensional interpolant.
pub trait Interp2D {
    /// Evaluate the interpolant at `(x, y)`.
    fn interp_one(&self, x: f64, y: f64) -> Result<f64, CacheError>;

    /// Evaluate the interpolant at the observation points `(x[k], y[k])`.
    ///
    /// # Errors
    ///   * If `x`, `y` and `out` are not all the same length
    ///   * If any observation coordinate is not finite
    #[inline]
    fn interp(&self, x: &[f64], y: &[f64], out: &mut [f64]) -> Result<(), CacheError> {
        if y.len() != x.len() {
            return Err(CacheError::DimensionMismatch {
                what: "y observations",
                expected: x.len(),
                got: y.len(),
            });
        }
        if out.len() != x.len() {
            return Err(CacheError::DimensionMismatch {
                what: "output",
                expected: x.len(),
                got: out.len(),
            });
        }

        for i in 0..x.len() {
            out[i] = self.interp_one(x[i], y[i])?;
        }

        Ok(())
    }

    /// Evaluate interpolant, allocating a new Vec for the output.
    #[inline]
    fn interp_alloc(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, CacheError> {
        let mut out = vec![0.0; x.len()];
        self.interp(x, y, &mut out)?;
        Ok(out)
    }
}

/// Blend the `N x N` block of `q` whose lower corner is `(k, l)`
/// at normalized cell coordinates `(tx, ty)`.
#[inline]
pub(crate) fn tensor_eval<const N: usize>(
    basis: &[[f64; N]; N],
    q: &Array2<f64>,
    (k, tx): (usize, f64),
    (l, ty): (usize, f64),
) -> f64 {
    let wx = weights(basis, tx);
    let wy = weights(basis, ty);

    let mut v = 0.0;
    for r in 0..N {
        let mut row = 0.0;
        for c in 0..N {
            row += wy[c] * q[[k + r, l + c]];
        }
        v += wx[r] * row;
    }
    v
}

/// Blend `N` consecutive entries of `q` starting at `k`.
#[inline]
pub(crate) fn line_eval<const N: usize>(basis: &[[f64; N]; N], q: &[f64], (k, t): (usize, f64)) -> f64 {
    weights(basis, t)
        .iter()
        .zip(&q[k..k + N])
        .map(|(w, v)| w * v)
        .sum()
}
