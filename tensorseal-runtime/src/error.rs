//! Handoff errors.

use std::fmt;

use tensorseal_core::SealError;

/// Errors from the decrypt-and-load attempt.
///
/// Every variant is terminal: the caller must treat the model as unusable
/// and all acquired runtime resources have already been released. There is
/// no partial-success state.
///
/// `ModelParseFailed` is the practical signal for a wrong key or corrupted
/// ciphertext. The envelope carries no authentication tag, so the two are
/// indistinguishable by design; this layer deliberately does not claim to
/// know *why* the bytes were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffError {
    /// Decrypt core failure (envelope or key source).
    Seal(SealError),

    /// The runtime rejected the plaintext as a model.
    ModelParseFailed,

    /// Interpreter construction failed.
    InterpreterCreateFailed,

    /// Tensor allocation failed, or the first input tensor came up
    /// missing or unwritable.
    TensorAllocationFailed,

    /// The proof-of-life forward pass failed.
    InvokeFailed,

    /// The first output tensor is missing or has zero byte size.
    OutputUnavailable,
}

impl fmt::Display for HandoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seal(e) => write!(f, "seal error: {}", e),
            Self::ModelParseFailed => write!(f, "model parse failed"),
            Self::InterpreterCreateFailed => write!(f, "interpreter create failed"),
            Self::TensorAllocationFailed => write!(f, "tensor allocation failed"),
            Self::InvokeFailed => write!(f, "invoke failed"),
            Self::OutputUnavailable => write!(f, "output unavailable"),
        }
    }
}

impl std::error::Error for HandoffError {}

impl From<SealError> for HandoffError {
    fn from(e: SealError) -> Self {
        Self::Seal(e)
    }
}
