use thiserror::Error;

/// Top-level error type for the euklid geometry toolkit.
#[derive(Debug, Error)]
pub enum EuklidError {
    /// A constructor received degenerate input: a zero-length direction
    /// for a line, collinear points or a zero normal for a plane.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// `intersect` or `connect` was invoked on a primitive pair with no
    /// implemented algorithm.
    #[error("no {operation} algorithm for {lhs} and {rhs}")]
    UnsupportedGeometry {
        operation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A scalar operand fell outside its required numeric domain.
    #[error("domain error: {parameter} = {value} ({reason})")]
    Domain {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Convenience type alias for results using [`EuklidError`].
pub type Result<T> = std::result::Result<T, EuklidError>;
