//! Sparse QR solve of assembled coefficient systems.
use faer::linalg::solvers::SolveLstsq;
use faer::sparse::{SparseColMat, Triplet};
use faer::Mat;
use ndarray::{Array1, Array2};

use crate::stencil::LinearSystem;
use crate::CacheError;

/// Largest accepted residual, relative to the size of the right-hand side.
const RESIDUAL_RTOL: f64 = 1e-8;

/// Solve the square sparse system given by `triplets` against `rhs`.
///
/// The factorization is a sparse QR, which completes on rank-deficient input;
/// singularity then shows up as a non-finite solution or a residual that does not vanish.
///
/// # Errors
/// * If `rhs` is not of length `size`
/// * If the triplets do not describe a `size x size` matrix
/// * If the matrix is singular
pub(crate) fn solve_sparse(
    size: usize,
    triplets: &[Triplet<usize, usize, f64>],
    rhs: &Array1<f64>,
) -> Result<Array1<f64>, CacheError> {
    if rhs.len() != size {
        return Err(CacheError::DimensionMismatch {
            what: "right-hand side",
            expected: size,
            got: rhs.len(),
        });
    }
    let phi = SparseColMat::<usize, f64>::try_new_from_triplets(size, size, triplets)
        .map_err(|_| CacheError::SingularSystem { size })?;
    let qr = phi
        .as_ref()
        .sp_qr()
        .map_err(|_| CacheError::SingularSystem { size })?;

    let b = Mat::<f64>::from_fn(size, 1, |i, _| rhs[i]);
    let q = qr.solve_lstsq(b.as_ref());

    let out = Array1::from_shape_fn(size, |i| q[(i, 0)]);
    if out.iter().any(|v| !v.is_finite()) {
        return Err(CacheError::SingularSystem { size });
    }

    let residual = residual_norm(triplets, &out, rhs);
    let scale = rhs.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    if residual > RESIDUAL_RTOL * scale {
        log::debug!("Rejected {size}x{size} solve with residual {residual:e}");
        return Err(CacheError::SingularSystem { size });
    }
    Ok(out)
}

/// Largest entry of `|A q - b|`, with `A` given in triplet form.
fn residual_norm(triplets: &[Triplet<usize, usize, f64>], q: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let mut r = -b.clone();
    for t in triplets {
        r[t.row] += t.val * q[t.col];
    }
    r.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Solve an assembled bicubic system, scale the solution and reshape it into
/// the padded coefficient grid.
pub(crate) fn coefficients(system: &LinearSystem, scale: f64) -> Result<Array2<f64>, CacheError> {
    let size = system.grid.size();
    let q = solve_sparse(size, &system.triplets, &system.rhs)?;
    log::debug!(
        "Solved {size}x{size} coefficient system with {} nonzeros",
        system.triplets.len()
    );

    let (rows, cols) = system.grid.shape();
    let got = q.len();
    (q * scale)
        .into_shape_with_order((rows, cols))
        .map_err(|_| CacheError::DimensionMismatch {
            what: "padded coefficient grid",
            expected: rows * cols,
            got,
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_small_system() {
        // [[4, 1], [1, 3]] q = [1, 2]
        let triplets = [
            Triplet::new(0, 0, 4.0),
            Triplet::new(0, 1, 1.0),
            Triplet::new(1, 0, 1.0),
            Triplet::new(1, 1, 3.0),
        ];
        let rhs = Array1::from(vec![1.0, 2.0]);
        let q = solve_sparse(2, &triplets, &rhs).unwrap();
        assert_relative_eq!(q[0], 1.0 / 11.0, epsilon = 1e-14);
        assert_relative_eq!(q[1], 7.0 / 11.0, epsilon = 1e-14);
    }

    #[test]
    fn test_singular_system_is_reported() {
        // Second row is a copy of the first
        let triplets = [
            Triplet::new(0, 0, 1.0),
            Triplet::new(0, 1, 2.0),
            Triplet::new(1, 0, 1.0),
            Triplet::new(1, 1, 2.0),
        ];
        let rhs = Array1::from(vec![1.0, 3.0]);
        assert!(matches!(
            solve_sparse(2, &triplets, &rhs),
            Err(CacheError::SingularSystem { size: 2 })
        ));
    }

    #[test]
    fn test_empty_column_is_reported() {
        // Nothing couples the last unknown to any row
        let triplets = [
            Triplet::new(0, 0, 2.0),
            Triplet::new(1, 0, 1.0),
            Triplet::new(1, 1, 1.0),
            Triplet::new(2, 1, 1.0),
        ];
        let rhs = Array1::from(vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            solve_sparse(3, &triplets, &rhs),
            Err(CacheError::SingularSystem { size: 3 })
        ));
    }

    #[test]
    fn test_residual_norm() {
        let triplets = [Triplet::new(0, 0, 2.0), Triplet::new(1, 1, 3.0)];
        let q = Array1::from(vec![1.0, 1.0]);
        let b = Array1::from(vec![2.0, 1.0]);
        assert_eq!(residual_norm(&triplets, &q, &b), 2.0);
    }

    #[test]
    fn test_rhs_length_checked() {
        let triplets = [Triplet::new(0, 0, 1.0)];
        let rhs = Array1::from(vec![1.0, 3.0]);
        assert!(matches!(
            solve_sparse(1, &triplets, &rhs),
            Err(CacheError::DimensionMismatch { .. })
        ));
    }
}
