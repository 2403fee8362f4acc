use thiserror::Error;

/// Configuration errors raised at construction boundaries.
///
/// These indicate a programming error in the embedding application (a bad
/// dropdown value, an impossible layer size), not a runtime condition to
/// recover from. Numerical edge cases during training (exp overflow, log of
/// zero) are clamped locally and never surface here; once a network and
/// store are constructed, training itself does not fail.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Activation name not present in the registry.
    #[error("unknown activation '{0}' (expected one of: none, relu, sigmoid, tanh)")]
    UnknownActivation(String),

    /// A layer dimension was zero at network construction.
    #[error("invalid {which} size {value}: layer sizes must be positive")]
    InvalidLayerSize { which: &'static str, value: usize },

    /// Requested hidden size falls outside the store's configured bounds.
    #[error("hidden size {size} out of range [{min}, {max}]")]
    HiddenSizeOutOfRange { size: usize, min: usize, max: usize },

    /// Matrix rows of unequal length passed to `Matrix::from_data`.
    #[error("ragged matrix: all rows must have equal length")]
    RaggedMatrix,
}
