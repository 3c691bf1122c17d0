//! Constant blending matrices shared by every cache of the same kind.
//!
//! Rows multiply descending powers of the normalized cell coordinate `t`,
//! columns select consecutive coefficients, so the local basis weights are
//! `w = [t^(N-1), ..., t, 1] * IP`.

/// Linear B-spline blending matrix, rows `[t, 1]`.
pub const LINEAR_BASIS: [[f64; 2]; 2] = [[-1.0, 1.0], [1.0, 0.0]];

/// Uniform cubic B-spline blending matrix, rows `[t^3, t^2, t, 1]`.
pub const CUBIC_BASIS: [[f64; 4]; 4] = [
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
    [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
];

/// Evaluate the blending weights at normalized coordinate `t` (Horner form).
#[inline]
pub fn weights<const N: usize>(basis: &[[f64; N]; N], t: f64) -> [f64; N] {
    let mut w = basis[0];
    for row in &basis[1..] {
        for c in 0..N {
            w[c] = w[c] * t + row[c];
        }
    }
    w
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partition_of_unity() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let lin: f64 = weights(&LINEAR_BASIS, t).iter().sum();
            let cub: f64 = weights(&CUBIC_BASIS, t).iter().sum();
            assert_relative_eq!(lin, 1.0, epsilon = 1e-15);
            assert_relative_eq!(cub, 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_cubic_knot_weights() {
        let w0 = weights(&CUBIC_BASIS, 0.0);
        let w1 = weights(&CUBIC_BASIS, 1.0);
        let expect0 = [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0];
        let expect1 = [0.0, 1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0];
        for c in 0..4 {
            assert_relative_eq!(w0[c], expect0[c], epsilon = 1e-15);
            assert_relative_eq!(w1[c], expect1[c], epsilon = 1e-15);
        }
    }

    #[test]
    fn test_linear_weights() {
        assert_eq!(weights(&LINEAR_BASIS, 0.25), [0.75, 0.25]);
    }
}
