//! Convenience methods for constructing knot sequences and observation grids
//! in a way that echoes, but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// The step is the exact difference of consecutive outputs up to rounding,
/// so the result passes the uniform-spacing check of every cache builder.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    if n < 2 {
        return vec![start; n];
    }
    let dx: T = (stop - start) / T::from(n - 1).unwrap_or_else(T::one);
    (0..n)
        .map(|i| start + T::from(i).unwrap_or_else(T::zero) * dx)
        .collect()
}

/// Generates a meshgrid in C ordering (x0, y0), (x0, y1), ..., (x0, yn), (x1, y0), ...
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

/// Flattened observation coordinates of a 2D meshgrid, like `(xs, ys)`,
/// ready to pass to the `interp` methods of the 2D caches.
pub fn mesh_obs<T>(x: &[T], y: &[T]) -> (Vec<T>, Vec<T>)
where
    T: Float,
{
    let x = x.to_vec();
    let y = y.to_vec();
    meshgrid(vec![&x, &y])
        .into_iter()
        .map(|p| (p[0], p[1]))
        .unzip()
}
