//! Bicubic B-spline cache on a regular grid.
//!
//! The coefficients live on an `(n + 2) x (m + 2)` grid padded by one ghost cell on every
//! side. For the `free` and `not-a-knot` boundary conditions they come from a sparse solve
//! of the interpolation conditions plus one closure row per ghost cell;
//! for `smooth` the samples are used directly and the ghost ring copies its nearest
//! interior neighbour.
//!
//! ```rust
//! use ndarray::Array2;
//! use splinecache::{BicubicCache, BoundaryCondition, Interp2D};
//! use splinecache::utils::linspace;
//!
//! let x = linspace(0.0, 1.0, 5);
//! let y = linspace(-1.0, 0.0, 5);
//! let z = Array2::from_shape_fn((5, 5), |(i, j)| x[j] * x[j] + y[i]);
//!
//! let cache = BicubicCache::new(&x, &y, z.view(), BoundaryCondition::NotAKnot, 0.0).unwrap();
//! assert_eq!(cache.coefficients().dim(), (7, 7));
//!
//! // Interpolates the samples and reproduces the quadratic between them
//! assert!((cache.interp_one(x[2], y[3]).unwrap() - z[[3, 2]]).abs() < 1e-10);
//! assert!((cache.interp_one(0.3, -0.6).unwrap() - (0.09 - 0.6)).abs() < 1e-10);
//! ```
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::axis::{check_shape, uniform_step, RegularAxis, DEFAULT_SPACING_RTOL};
use crate::basis::CUBIC_BASIS;
use crate::boundary::BoundaryCondition;
use crate::condition::condition;
use crate::interp::{tensor_eval, Interp2D};
use crate::io::SampleData;
use crate::solve::coefficients;
use crate::stencil::assemble;
use crate::CacheError;

/// Scale applied to the solved coefficients to undo the integer `[1, 4, 1]` knot weights.
const SOLUTION_SCALE: f64 = 36.0;

/// Whether the builder requires equal spacing along both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpacingMode {
    /// One shared step `h`; the `smooth` boundary condition is not available.
    #[default]
    Isotropic,
    /// Independent steps `hx` and `hy`.
    Anisotropic,
}

/// Build options for [`BicubicCache`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BicubicOptions {
    pub boundary: BoundaryCondition,
    pub spacing: SpacingMode,
    /// Thin-plate smoothing factor, 0 for none
    pub smoothing: f64,
    /// Relative tolerance for the uniform and isotropic spacing checks
    pub spacing_rtol: f64,
}

impl Default for BicubicOptions {
    fn default() -> Self {
        Self {
            boundary: BoundaryCondition::default(),
            spacing: SpacingMode::default(),
            smoothing: 0.0,
            spacing_rtol: DEFAULT_SPACING_RTOL,
        }
    }
}

impl BicubicOptions {
    pub fn new(boundary: BoundaryCondition) -> Self {
        Self {
            boundary,
            ..Default::default()
        }
    }

    pub fn with_spacing(mut self, spacing: SpacingMode) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_spacing_rtol(mut self, spacing_rtol: f64) -> Self {
        self.spacing_rtol = spacing_rtol;
        self
    }
}

/// Precomputed bicubic interpolant.
#[derive(Clone, Debug, PartialEq)]
pub struct BicubicCache {
    /// Knots along x, ascending, size n
    x: Vec<f64>,

    /// Knots along y, ascending, size m
    y: Vec<f64>,

    /// Conditioned samples, size m x n
    z: Array2<f64>,

    hx: f64,
    hy: f64,

    /// Padded coefficients, size (n + 2) x (m + 2)
    q: Array2<f64>,

    boundary: BoundaryCondition,
    spacing: SpacingMode,
}

impl BicubicCache {
    /// Build an isotropic cache from knots `x` (size n), `y` (size m) and samples `z` (m x n).
    ///
    /// # Errors
    /// * If the knot counts do not match the shape of `z`, or an axis has fewer than 2 knots
    /// * If `boundary` is `not-a-knot` and either axis has fewer than 4 knots
    /// * If `boundary` is `smooth`, which needs [`BicubicCache::new_anisotropic`]
    /// * If the knots are not finite, distinct and evenly spaced with `hx == hy`
    /// * If `smoothing` is negative or not finite
    /// * If the coefficient system cannot be solved
    pub fn new(
        x: &[f64],
        y: &[f64],
        z: ArrayView2<'_, f64>,
        boundary: BoundaryCondition,
        smoothing: f64,
    ) -> Result<Self, CacheError> {
        let options = BicubicOptions::new(boundary).with_smoothing(smoothing);
        Self::with_options(x, y, z, &options)
    }

    /// Build a cache with independent knot spacing along each axis, without smoothing.
    pub fn new_anisotropic(
        x: &[f64],
        y: &[f64],
        z: ArrayView2<'_, f64>,
        boundary: BoundaryCondition,
    ) -> Result<Self, CacheError> {
        let options = BicubicOptions::new(boundary).with_spacing(SpacingMode::Anisotropic);
        Self::with_options(x, y, z, &options)
    }

    /// Build a cache with every option spelled out.
    pub fn with_options(
        x: &[f64],
        y: &[f64],
        z: ArrayView2<'_, f64>,
        options: &BicubicOptions,
    ) -> Result<Self, CacheError> {
        let BicubicOptions {
            boundary,
            spacing,
            smoothing,
            spacing_rtol,
        } = *options;

        check_shape(x, y, z.dim(), 2)?;
        if boundary == BoundaryCondition::Smooth && spacing == SpacingMode::Isotropic {
            return Err(CacheError::UnsupportedBoundaryCondition(format!(
                "{boundary} (isotropic spacing)"
            )));
        }
        let (n, m) = (x.len(), y.len());
        let min = boundary.min_knots();
        if n < min || m < min {
            return Err(CacheError::InsufficientGridSize {
                boundary: boundary.name(),
                min,
                n,
                m,
            });
        }

        let samples = condition(x, y, z, smoothing)?;
        let hx = uniform_step("x", &samples.x, spacing_rtol)?;
        let mut hy = uniform_step("y", &samples.y, spacing_rtol)?;
        if spacing == SpacingMode::Isotropic {
            if (hy - hx).abs() > spacing_rtol * hx {
                return Err(CacheError::AnisotropicSpacing { hx, hy });
            }
            hy = hx;
        }

        let q = match boundary.closure() {
            Some(closure) => {
                let system = assemble(samples.z.view(), closure)?;
                coefficients(&system, SOLUTION_SCALE)?
            }
            None => clamped_ring(samples.z.view()),
        };

        log::debug!("Built bicubic cache on {n}x{m} grid, boundary {boundary}, hx = {hx}, hy = {hy}");

        Ok(Self {
            x: samples.x,
            y: samples.y,
            z: samples.z,
            hx,
            hy,
            q,
            boundary,
            spacing,
        })
    }

    /// Read samples from a file in the flat text layout and build a cache from them.
    pub fn from_file(path: impl AsRef<Path>, options: &BicubicOptions) -> Result<Self, CacheError> {
        let data = SampleData::read(path)?;
        Self::with_options(&data.x, &data.y, data.z.view(), options)
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

    /// Knot spacing like `(hx, hy)`. Both entries agree for isotropic caches.
    pub fn spacing(&self) -> (f64, f64) {
        (self.hx, self.hy)
    }

    pub fn spacing_mode(&self) -> SpacingMode {
        self.spacing
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Padded coefficient grid, size (n + 2) x (m + 2).
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.q
    }

    /// Blending matrix shared by all bicubic caches.
    pub fn basis(&self) -> &'static [[f64; 4]; 4] {
        &CUBIC_BASIS
    }
}

impl Interp2D for BicubicCache {
    #[inline]
    fn interp_one(&self, x: f64, y: f64) -> Result<f64, CacheError> {
        let cx = RegularAxis::new(self.x[0], self.hx, self.x.len()).locate(x)?;
        let cy = RegularAxis::new(self.y[0], self.hy, self.y.len()).locate(y)?;
        Ok(tensor_eval(&CUBIC_BASIS, &self.q, cx, cy))
    }
}

/// Samples as coefficients, with each ghost cell copying its nearest interior cell.
fn clamped_ring(z: ArrayView2<'_, f64>) -> Array2<f64> {
    let (m, n) = z.dim();
    Array2::from_shape_fn((n + 2, m + 2), |(a, b)| {
        z[[b.clamp(1, m) - 1, a.clamp(1, n) - 1]]
    })
}
