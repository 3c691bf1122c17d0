//! Boundary-condition policies for cubic caches.
//!
//! | Name         | Ghost coefficients come from                                   |
//! |--------------|----------------------------------------------------------------|
//! | `free`       | zero second derivative across the boundary (natural spline)    |
//! | `not-a-knot` | continuous third derivative across the first interior knot     |
//! | `smooth`     | clamped copy of the nearest interior coefficient, no solve     |
use core::fmt;
use core::str::FromStr;

use crate::CacheError;

/// Closed set of supported boundary conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    #[default]
    Free,
    NotAKnot,
    Smooth,
}

impl BoundaryCondition {
    /// Name used in files, logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            BoundaryCondition::Free => "free",
            BoundaryCondition::NotAKnot => "not-a-knot",
            BoundaryCondition::Smooth => "smooth",
        }
    }

    /// Smallest number of knots per axis the condition can close a system with.
    pub fn min_knots(self) -> usize {
        match self {
            BoundaryCondition::NotAKnot => 4,
            BoundaryCondition::Free | BoundaryCondition::Smooth => 2,
        }
    }

    /// The linear closure this condition adds to the coefficient system,
    /// or `None` when the ghost ring is filled directly.
    pub(crate) fn closure(self) -> Option<Closure> {
        match self {
            BoundaryCondition::Free => Some(Closure::Natural),
            BoundaryCondition::NotAKnot => Some(Closure::NotAKnot),
            BoundaryCondition::Smooth => None,
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryCondition {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(BoundaryCondition::Free),
            "not-a-knot" => Ok(BoundaryCondition::NotAKnot),
            "smooth" => Ok(BoundaryCondition::Smooth),
            other => Err(CacheError::UnsupportedBoundaryCondition(other.to_string())),
        }
    }
}

/// Boundary rows that take part in the linear solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Closure {
    Natural,
    NotAKnot,
}

impl Closure {
    /// Weights along the inward normal, starting at the ghost cell.
    ///
    /// Natural: `q[0] - 2 q[1] + q[2]` is the second derivative at the first knot.
    /// Not-a-knot: the jump of the third derivative across the second knot,
    /// `(-q[0] + 3 q[1] - 3 q[2] + q[3]) - (-q[1] + 3 q[2] - 3 q[3] + q[4])`.
    pub(crate) fn profile(self) -> &'static [f64] {
        match self {
            Closure::Natural => &[1.0, -2.0, 1.0],
            Closure::NotAKnot => &[-1.0, 4.0, -6.0, 4.0, -1.0],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_names() {
        for bc in [
            BoundaryCondition::Free,
            BoundaryCondition::NotAKnot,
            BoundaryCondition::Smooth,
        ] {
            assert_eq!(bc.name().parse::<BoundaryCondition>().unwrap(), bc);
            assert_eq!(bc.to_string(), bc.name());
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "nonsense".parse::<BoundaryCondition>().unwrap_err();
        assert!(matches!(err, CacheError::UnsupportedBoundaryCondition(ref s) if s == "nonsense"));
    }

    #[test]
    fn test_profiles_annihilate_cubics() {
        // Both closures must hold for any cubic polynomial sampled on the coefficient grid
        for closure in [Closure::Natural, Closure::NotAKnot] {
            let profile = closure.profile();
            let affine: f64 = profile
                .iter()
                .enumerate()
                .map(|(k, w)| w * (3.0 - 2.0 * k as f64))
                .sum();
            assert_eq!(affine, 0.0);
        }
        let cubic: f64 = Closure::NotAKnot
            .profile()
            .iter()
            .enumerate()
            .map(|(k, w)| {
                let k = k as f64;
                w * (k * k * k - 4.0 * k * k + k + 7.0)
            })
            .sum();
        assert_eq!(cubic, 0.0);
    }
}
