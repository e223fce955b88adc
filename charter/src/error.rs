use thiserror::Error;

/// Errors surfaced by the charting pipeline.
///
/// Every variant is recoverable: the failing sketch or simplification is
/// abandoned and the chart held by the caller is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CharterError {
    /// A beat denominator (or grid subdivision) was zero.
    #[error("invalid beat denominator: {0}")]
    InvalidDenominator(i64),

    /// Curve fitting could not proceed because the control x-values are
    /// not strictly increasing once the shape midpoints are interleaved.
    #[error("degenerate curve fit: x values not strictly increasing at knot {0}")]
    DegenerateFit(usize),
}
