//! Error type shared by every cache builder, the data conditioner and the file reader.
use thiserror::Error;

/// Reasons a cache could not be built, read, or evaluated.
///
/// Construction is deterministic, so retrying with the same input reproduces the same error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("dimension mismatch: {what} has {got} entries, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unsupported boundary condition `{0}`")]
    UnsupportedBoundaryCondition(String),

    #[error(
        "grid dimensions must be at least {min} for the {boundary} boundary condition, got {n}x{m}"
    )]
    InsufficientGridSize {
        boundary: &'static str,
        min: usize,
        n: usize,
        m: usize,
    },

    #[error("malformed cache file at line {line}: {reason}")]
    MalformedCacheFile { line: usize, reason: String },

    #[error("linear system of size {size} is singular")]
    SingularSystem { size: usize },

    #[error("insufficient points on {axis}: got {got}, need at least {min}")]
    InsufficientPoints {
        axis: &'static str,
        got: usize,
        min: usize,
    },

    #[error("non-finite value in {what} at index {idx}")]
    NonFinite { what: &'static str, idx: usize },

    #[error("duplicate knot {value} on {axis}")]
    DuplicateKnot { axis: &'static str, value: f64 },

    #[error("non-uniform spacing on {axis} at index {idx}: expected step {expected}, got {got}")]
    NonUniformSpacing {
        axis: &'static str,
        idx: usize,
        expected: f64,
        got: f64,
    },

    #[error("isotropic cache requires equal spacing, got hx = {hx}, hy = {hy}")]
    AnisotropicSpacing { hx: f64, hy: f64 },

    #[error("invalid smoothing factor {0}: must be finite and >= 0")]
    InvalidSmoothingFactor(f64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
