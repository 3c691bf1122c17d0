//! Preprocessing applied to raw samples before any coefficients are built:
//! sorting into ascending knot order, then optional thin-plate smoothing.
pub mod sort;
pub mod tps;

pub use sort::{sort_data, SortedSamples};
pub use tps::smooth;

use ndarray::ArrayView2;

use crate::CacheError;

/// Sort the samples, then smooth the values if `smoothing` is nonzero.
pub(crate) fn condition(
    x: &[f64],
    y: &[f64],
    z: ArrayView2<'_, f64>,
    smoothing: f64,
) -> Result<SortedSamples, CacheError> {
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(CacheError::InvalidSmoothingFactor(smoothing));
    }
    let mut samples = sort_data(x, y, z)?;
    if smoothing > 0.0 {
        samples.z = smooth(smoothing, &samples.x, &samples.y, samples.z.view())?;
    }
    Ok(samples)
}
