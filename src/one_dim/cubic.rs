//! Cubic B-spline curve on a regular grid, padded with one ghost coefficient at each end.

use faer::sparse::Triplet;
use ndarray::Array1;

use crate::axis::{uniform_step, RegularAxis, DEFAULT_SPACING_RTOL};
use crate::basis::CUBIC_BASIS;
use crate::boundary::{BoundaryCondition, Closure};
use crate::interp::{line_eval, Interp1D};
use crate::solve::solve_sparse;
use crate::stencil::KNOT_PROFILE;
use crate::CacheError;

use super::sort_curve;

/// Precomputed cubic curve.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicCache1D {
    /// Knots, ascending, size n
    x: Vec<f64>,

    /// Coefficients, size n + 2
    q: Vec<f64>,

    h: f64,
    boundary: BoundaryCondition,
}

impl CubicCache1D {
    /// Build from knots `x` and values `y`, in any order.
    ///
    /// # Errors
    /// * If `x` and `y` differ in length, or there are fewer knots than `boundary` needs
    /// * If a knot or value is not finite, a knot is repeated, or the knots are uneven
    /// * If the coefficient system cannot be solved
    pub fn new(x: &[f64], y: &[f64], boundary: BoundaryCondition) -> Result<Self, CacheError> {
        let (x, y) = sort_curve(x, y, 2)?;
        let n = x.len();
        if n < boundary.min_knots() {
            return Err(CacheError::InsufficientGridSize {
                boundary: boundary.name(),
                min: boundary.min_knots(),
                n,
                m: 1,
            });
        }
        let h = uniform_step("x", &x, DEFAULT_SPACING_RTOL)?;

        let q = match boundary.closure() {
            Some(closure) => solve_curve(&y, closure)?,
            None => {
                let mut q = Vec::with_capacity(n + 2);
                q.push(y[0]);
                q.extend_from_slice(&y);
                q.push(y[n - 1]);
                q
            }
        };
        log::debug!("Built cubic curve on {n} knots, boundary {boundary}, h = {h}");

        Ok(Self { x, q, h, boundary })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn spacing(&self) -> f64 {
        self.h
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Padded coefficients, size n + 2.
    pub fn coefficients(&self) -> &[f64] {
        &self.q
    }

    pub fn basis(&self) -> &'static [[f64; 4]; 4] {
        &CUBIC_BASIS
    }
}

impl Interp1D for CubicCache1D {
    #[inline]
    fn eval_one(&self, loc: f64) -> Result<f64, CacheError> {
        let cell = RegularAxis::new(self.x[0], self.h, self.x.len()).locate(loc)?;
        Ok(line_eval(&CUBIC_BASIS, &self.q, cell))
    }
}

/// Interpolation rows `[1, 4, 1]` at each knot, then one closure row per end.
fn solve_curve(y: &[f64], closure: Closure) -> Result<Vec<f64>, CacheError> {
    let n = y.len();
    let size = n + 2;
    let profile = closure.profile();

    let mut triplets = Vec::with_capacity(3 * n + 2 * profile.len());
    for j in 0..n {
        for (k, w) in KNOT_PROFILE.iter().enumerate() {
            triplets.push(Triplet::new(j, j + k, *w));
        }
    }
    for (k, w) in profile.iter().enumerate() {
        triplets.push(Triplet::new(n, k, *w));
        triplets.push(Triplet::new(n + 1, n + 1 - k, *w));
    }

    let mut rhs = Array1::<f64>::zeros(size);
    for j in 0..n {
        rhs[j] = y[j];
    }

    let q = solve_sparse(size, &triplets, &rhs)?;
    Ok(q.iter().map(|v| 6.0 * v).collect())
}
