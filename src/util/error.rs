//! Error types for yolopost.

use thiserror::Error;

/// Result alias for yolopost operations.
pub type YoloPostResult<T> = std::result::Result<T, YoloPostError>;

/// Errors raised while configuring a detector or reading its inputs.
///
/// The per-frame `detect` path never returns these; it degrades to an empty
/// outcome instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum YoloPostError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A tensor shape descriptor has the wrong number of dimensions.
    #[error("{tensor} shape must have rank {expected}, got {got}")]
    InvalidShapeRank {
        tensor: &'static str,
        expected: usize,
        got: usize,
    },
    /// The output buffer is shorter than the tensor geometry requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A threshold is not a finite value in `[0, 1]`.
    #[error("{name} threshold must be finite and within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// Reading the label table failed.
    #[error("label table I/O failed: {reason}")]
    LabelIo { reason: String },
}
