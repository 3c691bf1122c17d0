//! Precomputed B-spline interpolation caches for scalar fields sampled on regular 2D grids,
//! prioritizing correctness and fast repeated evaluation.
//!
//! A cache is built once from knots `x` (size n), `y` (size m) and samples `z` (m x n,
//! `z[[i, j]]` at `(x[j], y[i])`), and stores the spline coefficients next to a constant
//! blending matrix. Samples can arrive in any axis order and may be smoothed with a
//! thin-plate spline before the coefficients are built.
//!
//! | Cache                  | Coefficients      | Build cost                      | Eval. cost |
//! |------------------------|-------------------|---------------------------------|------------|
//! | [`BilinearCache`]      | n x m             | O(nm) copy                      | 4 terms    |
//! | [`BicubicCache`] free / not-a-knot | (n+2) x (m+2) | sparse LU, O((n+2)(m+2)) rows | 16 terms |
//! | [`BicubicCache`] smooth | (n+2) x (m+2)    | O(nm) copy                      | 16 terms   |
//! | [`LinearCache1D`]      | n                 | O(n) copy                       | 2 terms    |
//! | [`CubicCache1D`]       | n + 2             | sparse LU                       | 4 terms    |
//!
//! Thin-plate smoothing solves a dense system with one row per sample,
//! so it dominates the build cost of large grids.
//!
//! # Example: Bilinear and Bicubic
//! ```rust
//! use ndarray::Array2;
//! use splinecache::{BicubicCache, BilinearCache, BoundaryCondition, Interp2D};
//!
//! // Define a grid
//! let x = [0.0_f64, 1.0, 2.0, 3.0];
//! let y = [0.0_f64, 1.0, 2.0, 3.0];
//!
//! // Values at grid points
//! let z = Array2::from_shape_fn((4, 4), |(i, j)| x[j] - 2.0 * y[i]);
//!
//! let lin = BilinearCache::new(&x, &y, z.view(), 0.0).unwrap();
//! let cub = BicubicCache::new(&x, &y, z.view(), BoundaryCondition::Free, 0.0).unwrap();
//! assert_eq!(cub.coefficients().dim(), (6, 6));
//!
//! // Points to interpolate/extrapolate
//! let xobs = [0.5_f64, 4.0];
//! let yobs = [2.5, -1.0];
//!
//! // Both reproduce a plane, inside and outside the grid
//! for out in [lin.interp_alloc(&xobs, &yobs).unwrap(), cub.interp_alloc(&xobs, &yobs).unwrap()] {
//!     assert!((out[0] - (0.5 - 5.0)).abs() < 1e-10);
//!     assert!((out[1] - (4.0 + 2.0)).abs() < 1e-10);
//! }
//! ```
//!
//! # Example: Anisotropic Grid from a Sample File
//! ```rust
//! use splinecache::{BicubicCache, BicubicOptions, BoundaryCondition, Interp2D, SampleData, SpacingMode};
//!
//! let text = "n:\n2\nm:\n3\nx:\n0\n2\ny:\n0\n1\n2\nz:\n1\n3\n1\n3\n1\n3\n";
//! let data: SampleData = text.parse().unwrap();
//!
//! let options = BicubicOptions::new("smooth".parse::<BoundaryCondition>().unwrap())
//!     .with_spacing(SpacingMode::Anisotropic);
//! let cache = BicubicCache::with_options(&data.x, &data.y, data.z.view(), &options).unwrap();
//! assert_eq!(cache.spacing(), (2.0, 1.0));
//!
//! // The smooth boundary blends samples rather than interpolating them
//! assert!((cache.interp_one(0.0, 1.0).unwrap() - 4.0 / 3.0).abs() < 1e-12);
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

mod axis;
pub mod basis;
pub mod bicubic;
pub mod bilinear;
pub mod boundary;
pub mod condition;
pub mod error;
pub mod interp;
pub mod io;
pub mod one_dim;
mod solve;
mod stencil;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use axis::DEFAULT_SPACING_RTOL;
pub use bicubic::{BicubicCache, BicubicOptions, SpacingMode};
pub use bilinear::BilinearCache;
pub use boundary::BoundaryCondition;
pub use condition::{smooth, sort_data, SortedSamples};
pub use error::CacheError;
pub use interp::{Interp1D, Interp2D};
pub use io::SampleData;
pub use one_dim::{CubicCache1D, LinearCache1D};
