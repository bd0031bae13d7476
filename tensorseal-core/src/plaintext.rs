//! Zeroizing plaintext buffer.
//!
//! The decrypted model is short-lived by construction: it exists from the
//! end of the transform until the runtime handoff completes, then its
//! storage is overwritten with zeros before release.

use std::fmt;

use zeroize::Zeroizing;

/// An owned decrypted model buffer that zeroizes on Drop.
///
/// This type does not implement `Clone` to prevent plaintext duplication.
/// The handoff adapter borrows the bytes; it must not retain them past
/// teardown.
pub struct Plaintext(Zeroizing<Vec<u8>>);

impl Plaintext {
    /// Wrap an already-zeroizing buffer.
    pub(crate) fn new(data: Zeroizing<Vec<u8>>) -> Self {
        Self(data)
    }

    /// Get the plaintext bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get buffer length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print plaintext bytes
        f.debug_struct("Plaintext").field("len", &self.len()).finish()
    }
}

// Explicitly NOT implementing Clone to prevent plaintext duplication
// impl Clone for Plaintext { ... } // FORBIDDEN
