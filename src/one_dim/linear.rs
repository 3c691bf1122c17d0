//! Piecewise-linear curve on a regular grid.

use crate::axis::{uniform_step, RegularAxis, DEFAULT_SPACING_RTOL};
use crate::basis::LINEAR_BASIS;
use crate::interp::{line_eval, Interp1D};
use crate::CacheError;

use super::sort_curve;

/// Linear B-spline curve; the coefficients are the samples.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearCache1D {
    x: Vec<f64>,
    q: Vec<f64>,
    h: f64,
}

impl LinearCache1D {
    /// Build from knots `x` and values `y`, in any order.
    ///
    /// # Errors
    /// * If `x` and `y` differ in length, or there are fewer than 2 knots
    /// * If a knot or value is not finite, a knot is repeated, or the knots are uneven
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, CacheError> {
        let (x, q) = sort_curve(x, y, 2)?;
        let h = uniform_step("x", &x, DEFAULT_SPACING_RTOL)?;
        Ok(Self { x, q, h })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn spacing(&self) -> f64 {
        self.h
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.q
    }

    pub fn basis(&self) -> &'static [[f64; 2]; 2] {
        &LINEAR_BASIS
    }
}

impl Interp1D for LinearCache1D {
    #[inline]
    fn eval_one(&self, loc: f64) -> Result<f64, CacheError> {
        let cell = RegularAxis::new(self.x[0], self.h, self.x.len()).locate(loc)?;
        Ok(line_eval(&LINEAR_BASIS, &self.q, cell))
    }
}
