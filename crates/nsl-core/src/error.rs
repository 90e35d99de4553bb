//! Error taxonomy shared by all numerical kernels.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NslError {
    #[error("Insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("Invalid bounds: max ({max}) must be greater than min ({min})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Value {value} outside of domain [{min}, {max}]")]
    OutOfDomain { value: f64, min: f64, max: f64 },

    #[error("Abscissae are not strictly monotonic at index {index}")]
    NonMonotonic { index: usize },

    #[error("Stride must be at least 1")]
    InvalidStride,

    #[error("Buffer too short: {n} samples at stride {stride} need {required} elements, got {len}")]
    BufferTooShort {
        n: usize,
        stride: usize,
        required: usize,
        len: usize,
    },

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Unknown {kind} tag: {value}")]
    UnknownTag { kind: &'static str, value: i32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type NslResult<T> = Result<T, NslError>;

/// Fails with [`NslError::InsufficientPoints`] unless `actual >= required`.
pub fn require_points(actual: usize, required: usize) -> NslResult<()> {
    if actual < required {
        return Err(NslError::InsufficientPoints { required, actual });
    }
    Ok(())
}
