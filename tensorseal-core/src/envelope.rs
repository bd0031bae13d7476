//! Envelope parsing and bounds checking.
//!
//! Wire format:
//! ```text
//! +-----------------+----------------------+
//! | NONCE (16 B)    | CIPHERTEXT (N bytes) |
//! +-----------------+----------------------+
//! ```
//!
//! No other header, length field, or magic number exists at this layer.
//! A zero-length ciphertext body is valid.

use crate::error::SealError;

/// Nonce / IV prefix length. The full 16 bytes form the initial CTR
/// counter block.
pub const NONCE_LEN: usize = 16;

/// A validated envelope.
///
/// The body is borrowed from the input buffer; parsing never mutates or
/// copies the caller's ciphertext. The caller may reclaim its buffer once
/// the envelope (and anything derived from it) is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    nonce: [u8; NONCE_LEN],
    body: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split raw input into nonce and ciphertext body.
    ///
    /// # Errors
    ///
    /// Returns `SealError::MalformedInput` if the input is shorter than
    /// the 16-byte nonce. This is the only validation this layer can do:
    /// without an authentication tag, the body bytes are opaque.
    pub fn parse(raw: &'a [u8]) -> Result<Self, SealError> {
        // Bounds check: must at least hold the nonce
        if raw.len() < NONCE_LEN {
            return Err(SealError::MalformedInput);
        }

        let (prefix, body) = raw.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(prefix);

        Ok(Self { nonce, body })
    }

    /// Get the nonce.
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Get the ciphertext body.
    pub fn body(&self) -> &[u8] {
        self.body
    }
}
