//! Core errors.
//!
//! All errors are terminal. There is no recovery and no retry: the decrypt
//! transform is deterministic, so repeating an identical attempt cannot
//! change the outcome.

use std::fmt;

/// Errors from the decrypt core.
///
/// Note what is absent: there is no "wrong key" variant. The envelope
/// carries no authentication tag, so decryption with a wrong key produces
/// garbage bytes, not an error. Invalidity surfaces downstream when the
/// model runtime rejects the plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealError {
    /// Input shorter than the 16-byte nonce prefix.
    MalformedInput,

    /// A key source failed to yield exactly 16 key bytes.
    InvalidKey,
}

impl fmt::Display for SealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Deliberately terse. Do not leak details.
        match self {
            Self::MalformedInput => write!(f, "malformed input"),
            Self::InvalidKey => write!(f, "invalid key"),
        }
    }
}

impl std::error::Error for SealError {}
