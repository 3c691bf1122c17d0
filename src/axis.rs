//! Knot validation and cell lookup along one regular axis.
use itertools::Itertools;

use crate::CacheError;

/// Default relative tolerance used when checking that knots are evenly spaced.
pub const DEFAULT_SPACING_RTOL: f64 = 1e-6;

/// Check that a sorted knot sequence is long enough, finite and free of repeats.
pub(crate) fn check_knots(axis: &'static str, v: &[f64], min: usize) -> Result<(), CacheError> {
    if v.len() < min {
        return Err(CacheError::InsufficientPoints {
            axis,
            got: v.len(),
            min,
        });
    }
    if let Some(idx) = v.iter().position(|x| !x.is_finite()) {
        return Err(CacheError::NonFinite { what: axis, idx });
    }
    for (a, b) in v.iter().tuple_windows() {
        if a == b {
            return Err(CacheError::DuplicateKnot { axis, value: *a });
        }
    }
    Ok(())
}

/// Check the knot counts against a sample grid of shape `(m, n)`,
/// then check both axes have at least `min` knots.
pub(crate) fn check_shape(
    x: &[f64],
    y: &[f64],
    (m, n): (usize, usize),
    min: usize,
) -> Result<(), CacheError> {
    if x.len() != n {
        return Err(CacheError::DimensionMismatch {
            what: "x",
            expected: n,
            got: x.len(),
        });
    }
    if y.len() != m {
        return Err(CacheError::DimensionMismatch {
            what: "y",
            expected: m,
            got: y.len(),
        });
    }
    for (axis, got) in [("x", n), ("y", m)] {
        if got < min {
            return Err(CacheError::InsufficientPoints { axis, got, min });
        }
    }
    Ok(())
}

/// Step between the first two knots, after checking every other step agrees with it
/// to within `rtol`.
pub(crate) fn uniform_step(axis: &'static str, v: &[f64], rtol: f64) -> Result<f64, CacheError> {
    let step = v[1] - v[0];
    if step <= 0.0 {
        return Err(CacheError::NonUniformSpacing {
            axis,
            idx: 0,
            expected: step,
            got: step,
        });
    }
    for (idx, (a, b)) in v.iter().tuple_windows().enumerate().skip(1) {
        let got = b - a;
        if (got - step).abs() > rtol * step {
            return Err(CacheError::NonUniformSpacing {
                axis,
                idx,
                expected: step,
                got,
            });
        }
    }
    Ok(step)
}

/// A regular axis, which has the same spacing between each knot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RegularAxis {
    start: f64,
    step: f64,
    len: usize,
}

impl RegularAxis {
    pub(crate) fn new(start: f64, step: f64, len: usize) -> Self {
        Self { start, step, len }
    }

    /// Index of the lower knot of the containing cell, clipped to the interior,
    /// and the normalized coordinate relative to that knot.
    ///
    /// Outside the knot range the coordinate falls below 0 or above 1,
    /// which extrapolates the boundary cell polynomial.
    #[inline]
    pub(crate) fn locate(&self, loc: f64) -> Result<(usize, f64), CacheError> {
        if !loc.is_finite() {
            return Err(CacheError::NonFinite {
                what: "query",
                idx: 0,
            });
        }

        // Nominal location may be outside the grid
        let u = (loc - self.start) / self.step;
        let i = (u.floor().max(0.0) as usize).min(self.len - 2);

        Ok((i, u - i as f64))
    }
}
