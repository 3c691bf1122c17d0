//! Sorting of scattered-order grid samples into ascending knot order.
use itertools::Itertools;
use ndarray::{Array2, ArrayView2, Axis};

use crate::axis::check_knots;
use crate::CacheError;

/// Grid samples with both axes in strictly ascending order.
///
/// `z[[i, j]]` is the value at `(x[j], y[i])`.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedSamples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Array2<f64>,
}

/// Sort both axes ascending and permute the columns (x) and rows (y) of `z` to match.
///
/// The sort is stable and depends only on the coordinate values, so any permutation of the
/// same rows and columns produces bit-identical output.
///
/// # Errors
/// * If `x.len()` is not the number of columns of `z`, or `y.len()` its number of rows
/// * If any coordinate or value is not finite
/// * If a coordinate is repeated along either axis
pub fn sort_data(x: &[f64], y: &[f64], z: ArrayView2<'_, f64>) -> Result<SortedSamples, CacheError> {
    let (m, n) = z.dim();
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
    if let Some(idx) = z.iter().position(|v| !v.is_finite()) {
        return Err(CacheError::NonFinite { what: "z", idx });
    }

    let (xs, px) = sort_axis("x", x)?;
    let (ys, py) = sort_axis("y", y)?;
    let z = z.select(Axis(0), &py).select(Axis(1), &px);

    Ok(SortedSamples { x: xs, y: ys, z })
}

/// Sorted copy of one axis and the permutation that produced it.
pub(crate) fn sort_axis(axis: &'static str, v: &[f64]) -> Result<(Vec<f64>, Vec<usize>), CacheError> {
    if let Some(idx) = v.iter().position(|x| !x.is_finite()) {
        return Err(CacheError::NonFinite { what: axis, idx });
    }
    let perm: Vec<usize> = (0..v.len())
        .sorted_by(|&a, &b| v[a].total_cmp(&v[b]))
        .collect();
    let sorted: Vec<f64> = perm.iter().map(|&k| v[k]).collect();
    check_knots(axis, &sorted, 1)?;
    Ok((sorted, perm))
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sort_keeps_correspondence() {
        let x = [2.0, 0.0, 1.0];
        let y = [10.0, -10.0];
        // z[i, j] = 100 * y[i] + x[j]
        let z = array![[1002.0, 1000.0, 1001.0], [-998.0, -1000.0, -999.0]];

        let s = sort_data(&x, &y, z.view()).unwrap();
        assert_eq!(s.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(s.y, vec![-10.0, 10.0]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(s.z[[i, j]], 100.0 * s.y[i] + s.x[j]);
            }
        }
    }

    #[test]
    fn test_sort_already_sorted_is_identity() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0, 2.0];
        let z = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let s = sort_data(&x, &y, z.view()).unwrap();
        assert_eq!(s.z, z);
    }

    #[test]
    fn test_sort_errors() {
        let z = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            sort_data(&[0.0, 1.0], &[0.0, 1.0], z.view()),
            Err(CacheError::DimensionMismatch { what: "x", expected: 3, got: 2 })
        ));
        assert!(matches!(
            sort_data(&[0.0, 1.0, 2.0], &[0.0], z.view()),
            Err(CacheError::DimensionMismatch { what: "y", .. })
        ));
        assert!(matches!(
            sort_data(&[0.0, 1.0, 0.0], &[0.0, 1.0], z.view()),
            Err(CacheError::DuplicateKnot { axis: "x", .. })
        ));
        assert!(matches!(
            sort_data(&[0.0, 1.0, 2.0], &[f64::NAN, 1.0], z.view()),
            Err(CacheError::NonFinite { what: "y", idx: 0 })
        ));

        let mut bad = z.clone();
        bad[[1, 2]] = f64::INFINITY;
        assert!(matches!(
            sort_data(&[0.0, 1.0, 2.0], &[0.0, 1.0], bad.view()),
            Err(CacheError::NonFinite { what: "z", idx: 5 })
        ));
    }
}
