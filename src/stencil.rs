//! Assembly of the sparse coefficient system for bicubic caches.
//!
//! The unknowns are the coefficients of an `(n + 2) x (m + 2)` padded grid: the `n x m`
//! interior maps onto the samples and a one-cell ghost ring closes the system.
//! Cell `(a, b)` sits at column `a * (m + 2) + b` (`a` along x, `b` along y).
//!
//! Each row of the system is one [`Stencil`], a short list of offset taps, applied at a
//! named anchor cell. Rows come in nine disjoint [`Family`] blocks, in this order:
//!
//! | Family              | Rows  | Anchor                   | Stencil                          |
//! |---------------------|-------|--------------------------|----------------------------------|
//! | interior            | `n*m` | `(j + 1, i + 1)`         | `[1, 4, 1] x [1, 4, 1]`          |
//! | left / right edge   | `m`   | `(0, i + 1)`, `(n + 1, i + 1)` | closure profile along x    |
//! | bottom / top edge   | `n`   | `(j + 1, 0)`, `(j + 1, m + 1)` | closure profile along y    |
//! | corners             | `4`   | the four ghost corners   | sum of both adjoining profiles   |
//!
//! Interior rows carry the sample values and every other row is homogeneous.
//! Summing the two edge profiles at a corner reproduces the tensor-product extrapolation
//! of the edges, which keeps the system nonsingular for every valid grid size.
use core::ops::Range;

use faer::sparse::Triplet;
use ndarray::{Array1, ArrayView2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::boundary::Closure;
use crate::CacheError;

/// Unscaled cardinal cubic B-spline at the knot and its two neighbours, `[1, 4, 1] / 6`.
pub(crate) const KNOT_PROFILE: [f64; 3] = [1.0, 4.0, 1.0];

/// One tap of a stencil: offset from the anchor along x and y, and its weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    pub da: isize,
    pub db: isize,
    pub weight: f64,
}

/// A linear combination of padded-grid cells relative to an anchor cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stencil {
    taps: Vec<Tap>,
}

impl Stencil {
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Interpolation condition at a knot, centered on the anchor.
    pub fn interior() -> Self {
        let mut taps = Vec::with_capacity(9);
        for (da, wa) in (-1..=1).zip(KNOT_PROFILE) {
            for (db, wb) in (-1..=1).zip(KNOT_PROFILE) {
                taps.push(Tap {
                    da,
                    db,
                    weight: wa * wb,
                });
            }
        }
        Self { taps }
    }

    /// A 1D profile laid out from the anchor along `dir`.
    fn along(profile: &[f64], dir: (isize, isize)) -> Self {
        let taps = profile
            .iter()
            .enumerate()
            .map(|(k, &weight)| Tap {
                da: dir.0 * k as isize,
                db: dir.1 * k as isize,
                weight,
            })
            .collect();
        Self { taps }
    }

    pub(crate) fn edge(closure: Closure, side: Side) -> Self {
        Self::along(closure.profile(), side.inward())
    }

    pub(crate) fn corner(closure: Closure, corner: Corner) -> Self {
        let (sx, sy) = corner.sides();
        Self::edge(closure, sx).merge(Self::edge(closure, sy))
    }

    /// Sum of two stencils, combining taps on the same cell.
    fn merge(mut self, other: Stencil) -> Self {
        for tap in other.taps {
            match self
                .taps
                .iter_mut()
                .find(|t| t.da == tap.da && t.db == tap.db)
            {
                Some(t) => t.weight += tap.weight,
                None => self.taps.push(tap),
            }
        }
        self
    }
}

/// Edges of the padded grid. Left/right bound x, bottom/top bound y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

impl Side {
    /// Unit step from the ghost cell towards the interior.
    fn inward(self) -> (isize, isize) {
        match self {
            Side::Left => (1, 0),
            Side::Right => (-1, 0),
            Side::Bottom => (0, 1),
            Side::Top => (0, -1),
        }
    }
}

/// Corners of the padded grid; lower/upper along y, left/right along x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

impl Corner {
    /// The x-bounding and y-bounding edges that meet at this corner.
    fn sides(self) -> (Side, Side) {
        match self {
            Corner::LowerLeft => (Side::Left, Side::Bottom),
            Corner::LowerRight => (Side::Right, Side::Bottom),
            Corner::UpperLeft => (Side::Left, Side::Top),
            Corner::UpperRight => (Side::Right, Side::Top),
        }
    }

    fn ordinal(self) -> usize {
        match self {
            Corner::LowerLeft => 0,
            Corner::LowerRight => 1,
            Corner::UpperLeft => 2,
            Corner::UpperRight => 3,
        }
    }
}

/// Shape of a coefficient grid with its one-cell ghost ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddedGrid {
    n: usize,
    m: usize,
}

impl PaddedGrid {
    /// Padded grid around `n` knots along x and `m` knots along y.
    pub fn new(n: usize, m: usize) -> Self {
        Self { n, m }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n + 2, self.m + 2)
    }

    /// Number of cells, which is also the size of the square system.
    pub fn size(&self) -> usize {
        (self.n + 2) * (self.m + 2)
    }

    #[inline]
    pub fn flat(&self, a: usize, b: usize) -> usize {
        a * (self.m + 2) + b
    }

    /// Flat index of the cell `tap` reaches from `anchor`, if it is on the grid.
    #[inline]
    pub fn offset(&self, anchor: (usize, usize), tap: &Tap) -> Option<usize> {
        let (rows, cols) = self.shape();
        let a = anchor.0.checked_add_signed(tap.da).filter(|&a| a < rows)?;
        let b = anchor.1.checked_add_signed(tap.db).filter(|&b| b < cols)?;
        Some(self.flat(a, b))
    }
}

/// A block of rows of the system that share one stencil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Interior,
    Edge(Side),
    Corner(Corner),
}

impl Family {
    /// Every family, in row order.
    pub const ALL: [Family; 9] = [
        Family::Interior,
        Family::Edge(Side::Left),
        Family::Edge(Side::Right),
        Family::Edge(Side::Bottom),
        Family::Edge(Side::Top),
        Family::Corner(Corner::LowerLeft),
        Family::Corner(Corner::LowerRight),
        Family::Corner(Corner::UpperLeft),
        Family::Corner(Corner::UpperRight),
    ];

    /// Rows of the system owned by this family.
    pub fn rows(self, grid: PaddedGrid) -> Range<usize> {
        let (n, m) = (grid.n, grid.m);
        let edges = n * m;
        let corners = edges + 2 * m + 2 * n;
        let (start, len) = match self {
            Family::Interior => (0, n * m),
            Family::Edge(Side::Left) => (edges, m),
            Family::Edge(Side::Right) => (edges + m, m),
            Family::Edge(Side::Bottom) => (edges + 2 * m, n),
            Family::Edge(Side::Top) => (edges + 2 * m + n, n),
            Family::Corner(c) => (corners + c.ordinal(), 1),
        };
        start..start + len
    }

    /// Anchor cell of each row, in row order.
    pub fn anchors(self, grid: PaddedGrid) -> Vec<(usize, usize)> {
        let (n, m) = (grid.n, grid.m);
        match self {
            // Row j * m + i holds sample (x[j], y[i])
            Family::Interior => (0..n)
                .flat_map(|j| (0..m).map(move |i| (j + 1, i + 1)))
                .collect(),
            Family::Edge(Side::Left) => (0..m).map(|i| (0, i + 1)).collect(),
            Family::Edge(Side::Right) => (0..m).map(|i| (n + 1, i + 1)).collect(),
            Family::Edge(Side::Bottom) => (0..n).map(|j| (j + 1, 0)).collect(),
            Family::Edge(Side::Top) => (0..n).map(|j| (j + 1, m + 1)).collect(),
            Family::Corner(Corner::LowerLeft) => vec![(0, 0)],
            Family::Corner(Corner::LowerRight) => vec![(n + 1, 0)],
            Family::Corner(Corner::UpperLeft) => vec![(0, m + 1)],
            Family::Corner(Corner::UpperRight) => vec![(n + 1, m + 1)],
        }
    }

    pub(crate) fn stencil(self, closure: Closure) -> Stencil {
        match self {
            Family::Interior => Stencil::interior(),
            Family::Edge(side) => Stencil::edge(closure, side),
            Family::Corner(corner) => Stencil::corner(closure, corner),
        }
    }

    /// Nonzero entries of this family's rows.
    fn triplets(self, grid: PaddedGrid, closure: Closure) -> Vec<Triplet<usize, usize, f64>> {
        let stencil = self.stencil(closure);
        self.anchors(grid)
            .into_iter()
            .zip(self.rows(grid))
            .flat_map(|(anchor, row)| {
                stencil.taps().iter().filter_map(move |tap| {
                    grid.offset(anchor, tap)
                        .map(|col| Triplet::new(row, col, tap.weight))
                })
            })
            .collect()
    }
}

/// The square system `Phi q = P` over a padded coefficient grid, in triplet form.
pub struct LinearSystem {
    pub(crate) grid: PaddedGrid,
    pub(crate) triplets: Vec<Triplet<usize, usize, f64>>,
    pub(crate) rhs: Array1<f64>,
}

/// Assemble the system for sample grid `z` (`m x n`, `z[[i, j]]` at `(x[j], y[i])`).
///
/// # Errors
/// * If either axis is too short for the closure profile to stay on the padded grid
pub(crate) fn assemble(z: ArrayView2<'_, f64>, closure: Closure) -> Result<LinearSystem, CacheError> {
    let (m, n) = z.dim();
    let reach = closure.profile().len();
    if n + 2 < reach || m + 2 < reach || n == 0 || m == 0 {
        return Err(CacheError::InsufficientGridSize {
            boundary: match closure {
                Closure::Natural => "free",
                Closure::NotAKnot => "not-a-knot",
            },
            min: reach.saturating_sub(2).max(1),
            n,
            m,
        });
    }
    let grid = PaddedGrid::new(n, m);

    // Interior block is the row-major flatten of z^T, boundary block is zero
    let mut rhs = Array1::<f64>::zeros(grid.size());
    for j in 0..n {
        for i in 0..m {
            rhs[j * m + i] = z[[i, j]];
        }
    }

    // Families own disjoint rows, so they can be expanded independently
    #[cfg(feature = "parallel")]
    let triplets: Vec<_> = Family::ALL
        .par_iter()
        .flat_map_iter(|f| f.triplets(grid, closure))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let triplets: Vec<_> = Family::ALL
        .iter()
        .flat_map(|f| f.triplets(grid, closure))
        .collect();

    for family in Family::ALL {
        log::trace!(
            "{family:?} rows {:?} with {} taps",
            family.rows(grid),
            family.stencil(closure).taps().len()
        );
    }

    Ok(LinearSystem {
        grid,
        triplets,
        rhs,
    })
}
