//! Thin-plate spline regression of a gridded value field.
//!
//! The grid nodes are treated as scattered control points. A thin-plate spline with an affine
//! part is fitted with a ridge `factor` on the kernel diagonal, then evaluated back at the
//! nodes. As the factor grows the fit relaxes from exact interpolation towards the
//! least-squares plane; affine data is reproduced exactly for every factor.
use faer::linalg::solvers::{PartialPivLu, Solve};
use faer::Mat;
use itertools::iproduct;
use ndarray::{Array2, ArrayView2};

use crate::CacheError;

/// Grids above this many nodes make the dense fit slow enough to mention.
const LARGE_FIT_NODES: usize = 2500;

/// The TPS basis function: U(r) = r^2 * log(r), with U(0) = 0.
#[inline]
fn tps_basis(r: f64) -> f64 {
    if r == 0.0 {
        0.0
    } else {
        r * r * r.ln()
    }
}

#[inline]
fn dist(p: (f64, f64), q: (f64, f64)) -> f64 {
    ((p.0 - q.0).powi(2) + (p.1 - q.1).powi(2)).sqrt()
}

/// Regularize `z` with a thin-plate spline fit of weight `factor`.
///
/// `z[[i, j]]` is the value at `(x[j], y[i])`; the output has the same shape and layout.
/// A factor of zero returns the input unchanged.
///
/// # Errors
/// * If `factor` is negative or not finite
/// * If the axis lengths do not match the shape of `z`
/// * If the regression system is singular
pub fn smooth(
    factor: f64,
    x: &[f64],
    y: &[f64],
    z: ArrayView2<'_, f64>,
) -> Result<Array2<f64>, CacheError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(CacheError::InvalidSmoothingFactor(factor));
    }
    let (m, n) = z.dim();
    if x.len() != n || y.len() != m {
        return Err(CacheError::DimensionMismatch {
            what: "smoothing axes",
            expected: n * m,
            got: x.len() * y.len(),
        });
    }
    if factor == 0.0 {
        return Ok(z.to_owned());
    }

    let size = n * m;
    if size > LARGE_FIT_NODES {
        log::warn!(
            "Thin-plate smoothing over {size} nodes solves a dense {}x{} system",
            size + 3,
            size + 3
        );
    }

    // Control points in the same row-major order as `z.iter()`
    let points: Vec<(f64, f64)> = iproduct!(y.iter(), x.iter()).map(|(&yi, &xj)| (xj, yi)).collect();
    let values: Vec<f64> = z.iter().copied().collect();

    // L = [[K + factor I, P], [P^T, 0]] with P = [1, x, y]
    let affine = |p: (f64, f64), k: usize| match k {
        0 => 1.0,
        1 => p.0,
        _ => p.1,
    };
    let l = Mat::<f64>::from_fn(size + 3, size + 3, |r, c| match (r < size, c < size) {
        (true, true) => {
            let ridge = if r == c { factor } else { 0.0 };
            tps_basis(dist(points[r], points[c])) + ridge
        }
        (true, false) => affine(points[r], c - size),
        (false, true) => affine(points[c], r - size),
        (false, false) => 0.0,
    });
    let rhs = Mat::<f64>::from_fn(size + 3, 1, |r, _| if r < size { values[r] } else { 0.0 });

    let lu = PartialPivLu::new(l.as_ref());
    let sol = lu.solve(rhs.as_ref());
    let weights: Vec<f64> = (0..size + 3).map(|r| sol[(r, 0)]).collect();
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(CacheError::SingularSystem { size: size + 3 });
    }

    // Evaluate the fitted surface back at the control points
    let (a0, ax, ay) = (weights[size], weights[size + 1], weights[size + 2]);
    let fitted: Vec<f64> = points
        .iter()
        .map(|&p| {
            let radial: f64 = points
                .iter()
                .zip(&weights[..size])
                .map(|(&q, w)| w * tps_basis(dist(p, q)))
                .sum();
            a0 + ax * p.0 + ay * p.1 + radial
        })
        .collect();

    log::debug!("Thin-plate smoothing over {m}x{n} grid with factor {factor:e}");

    Array2::from_shape_vec((m, n), fitted).map_err(|_| CacheError::DimensionMismatch {
        what: "smoothed grid",
        expected: size,
        got: size,
    })
}
