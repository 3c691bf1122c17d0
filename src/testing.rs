use ndarray::Array2;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::utils::linspace;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Random `m x n` value grid in [0, 1)
pub fn random_grid(rng: &mut StdRng, m: usize, n: usize) -> Array2<f64> {
    let vals = randn::<f64>(rng, m * n);
    Array2::from_shape_fn((m, n), |(i, j)| vals[i * n + j])
}

/// A plane on the unit square sampled on an `n x m` grid, with and without uniform noise
/// of the given amplitude, like `(x, y, truth, noisy)`.
pub fn noisy_plane(
    rng: &mut StdRng,
    n: usize,
    m: usize,
    amplitude: f64,
) -> (Vec<f64>, Vec<f64>, Array2<f64>, Array2<f64>) {
    let x = linspace(0.0, 1.0, n);
    let y = linspace(0.0, 1.0, m);
    let truth = Array2::from_shape_fn((m, n), |(i, j)| 0.5 + 0.75 * x[j] - 0.25 * y[i]);
    let noise = random_grid(rng, m, n);
    let noisy = &truth + &noise.mapv(|v| (2.0 * v - 1.0) * amplitude);
    (x, y, truth, noisy)
}
