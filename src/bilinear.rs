//! Bilinear B-spline cache on a regular grid.
//!
//! Linear B-splines interpolate their coefficients exactly, so the coefficient grid is the
//! (conditioned) sample grid itself and no linear system is solved.
//!
//! ```rust
//! use ndarray::array;
//! use splinecache::{BilinearCache, Interp2D};
//!
//! let x = [0.0, 1.0, 2.0];
//! let y = [0.0, 0.5];
//! // z[[i, j]] is the sample at (x[j], y[i])
//! let z = array![[0.0, 1.0, 2.0], [1.0, 2.0, 3.0]];
//!
//! let cache = BilinearCache::new(&x, &y, z.view(), 0.0).unwrap();
//! assert_eq!(cache.coefficients().dim(), (3, 2));
//! assert!((cache.interp_one(1.5, 0.25).unwrap() - 2.0).abs() < 1e-12);
//! ```
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::axis::{check_shape, uniform_step, RegularAxis, DEFAULT_SPACING_RTOL};
use crate::basis::LINEAR_BASIS;
use crate::condition::condition;
use crate::interp::{tensor_eval, Interp2D};
use crate::io::SampleData;
use crate::CacheError;

/// Precomputed bilinear interpolant.
#[derive(Clone, Debug, PartialEq)]
pub struct BilinearCache {
    /// Knots along x, ascending, size n
    x: Vec<f64>,

    /// Knots along y, ascending, size m
    y: Vec<f64>,

    /// Conditioned samples, size m x n
    z: Array2<f64>,

    /// Knot spacing along each axis
    hx: f64,
    hy: f64,

    /// Coefficients, size n x m, `q[[j, i]] == z[[i, j]]`
    q: Array2<f64>,
}

impl BilinearCache {
    /// Build a cache from knots `x` (size n), `y` (size m) and samples `z` (m x n),
    /// smoothing the samples first if `smoothing` is nonzero.
    ///
    /// Knots may arrive in any order; they are sorted along with the samples.
    ///
    /// # Errors
    /// * If the knot counts do not match the shape of `z`
    /// * If either axis has fewer than 2 knots
    /// * If any knot or sample is not finite, or a knot is repeated
    /// * If the knots are not evenly spaced
    /// * If `smoothing` is negative or not finite
    pub fn new(
        x: &[f64],
        y: &[f64],
        z: ArrayView2<'_, f64>,
        smoothing: f64,
    ) -> Result<Self, CacheError> {
        Self::with_spacing_rtol(x, y, z, smoothing, DEFAULT_SPACING_RTOL)
    }

    /// Like [`BilinearCache::new`], with an explicit relative tolerance for the
    /// uniform-spacing check.
    pub fn with_spacing_rtol(
        x: &[f64],
        y: &[f64],
        z: ArrayView2<'_, f64>,
        smoothing: f64,
        spacing_rtol: f64,
    ) -> Result<Self, CacheError> {
        check_shape(x, y, z.dim(), 2)?;
        let samples = condition(x, y, z, smoothing)?;
        let hx = uniform_step("x", &samples.x, spacing_rtol)?;
        let hy = uniform_step("y", &samples.y, spacing_rtol)?;

        // Coefficients are the samples, indexed (x, y)
        let q = samples.z.t().to_owned();

        log::debug!(
            "Built bilinear cache on {}x{} grid, hx = {hx}, hy = {hy}",
            samples.x.len(),
            samples.y.len()
        );

        Ok(Self {
            x: samples.x,
            y: samples.y,
            z: samples.z,
            hx,
            hy,
            q,
        })
    }

    /// Read samples from a file in the flat text layout and build a cache from them.
    pub fn from_file(path: impl AsRef<Path>, smoothing: f64) -> Result<Self, CacheError> {
        let data = SampleData::read(path)?;
        Self::new(&data.x, &data.y, data.z.view(), smoothing)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Conditioned samples, `z[[i, j]]` at `(x[j], y[i])`.
    pub fn z(&self) -> &Array2<f64> {
        &self.z
    }

    /// Knot spacing like `(hx, hy)`.
    pub fn spacing(&self) -> (f64, f64) {
        (self.hx, self.hy)
    }

    /// Coefficient grid, size n x m.
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.q
    }

    /// Blending matrix shared by all bilinear caches.
    pub fn basis(&self) -> &'static [[f64; 2]; 2] {
        &LINEAR_BASIS
    }
}

impl Interp2D for BilinearCache {
    #[inline]
    fn interp_one(&self, x: f64, y: f64) -> Result<f64, CacheError> {
        let cx = RegularAxis::new(self.x[0], self.hx, self.x.len()).locate(x)?;
        let cy = RegularAxis::new(self.y[0], self.hy, self.y.len()).locate(y)?;
        Ok(tensor_eval(&LINEAR_BASIS, &self.q, cx, cy))
    }
}
