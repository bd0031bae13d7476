//! Key material and key sources.
//!
//! The decrypt pipeline asks a `KeySource` for a fresh key per operation
//! and wipes it as soon as the cipher schedule is initialized. Keys are
//! never persisted and never logged; the only diagnostic surface is a
//! truncated SHA-256 fingerprint.

use std::fmt;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SealError;

/// Key length in bytes (AES-128).
pub const KEY_LEN: usize = 16;

/// A 128-bit cipher key.
///
/// Zeroized on drop. Does not implement `Clone`: a key lives exactly as
/// long as the one decrypt operation that loaded it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 32 hex characters.
    ///
    /// # Errors
    ///
    /// Returns `SealError::InvalidKey` if the input is not exactly 16
    /// bytes of valid hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, SealError> {
        let raw = hex::decode(hex_str.trim()).map_err(|_| SealError::InvalidKey)?;
        let bytes: [u8; KEY_LEN] = raw.try_into().map_err(|_| SealError::InvalidKey)?;
        Ok(Self(bytes))
    }

    /// Get the raw key bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Compute a key fingerprint for diagnostics.
    ///
    /// Returns the first 8 bytes of SHA256(key) as a hex string. Safe to
    /// log; the key bytes themselves must never be.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        let digest = hasher.finalize();
        hex::encode(&digest[..8]) // 16 hex chars
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key bytes
        f.debug_tuple("Key").field(&self.fingerprint()).finish()
    }
}

// Explicitly NOT implementing Clone
// impl Clone for Key { ... } // FORBIDDEN

/// A pluggable source of key material.
///
/// The pipeline only requires "a function that yields exactly 16 key
/// bytes". How those bytes are obtained (embedded constant, environment,
/// file, hardware keystore) is the implementation's concern. A source must
/// not log or otherwise expose the key.
pub trait KeySource {
    /// Yield a fresh key.
    ///
    /// # Errors
    ///
    /// Returns `SealError::InvalidKey` if the source cannot produce
    /// exactly 16 key bytes.
    fn load(&self) -> Result<Key, SealError>;
}

/// Key embedded at build time.
///
/// This is the weakest possible source: the key is recoverable from the
/// binary. Acceptable for raising the extraction bar on a bundled model,
/// not for anything stronger. Production deployments should implement
/// `KeySource` over a hardware-backed keystore instead.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct FixedKey([u8; KEY_LEN]);

impl FixedKey {
    /// Create a fixed key source from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl KeySource for FixedKey {
    fn load(&self) -> Result<Key, SealError> {
        Ok(Key::from_bytes(self.0))
    }
}

/// Key read from an environment variable (32 hex chars).
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    /// Create a source reading from the named environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvKey {
    fn load(&self) -> Result<Key, SealError> {
        let hex_str = std::env::var(&self.var).map_err(|_| SealError::InvalidKey)?;
        Key::from_hex(&hex_str)
    }
}

/// Key read from a file (32 hex chars).
pub struct FileKey {
    path: PathBuf,
}

impl FileKey {
    /// Create a source reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeySource for FileKey {
    fn load(&self) -> Result<Key, SealError> {
        let hex_str = std::fs::read_to_string(&self.path).map_err(|_| SealError::InvalidKey)?;
        Key::from_hex(&hex_str)
    }
}
