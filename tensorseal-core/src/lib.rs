//! TensorSeal Core
//!
//! Ephemeral decryption pipeline for ML models stored encrypted at rest.
//!
//! This crate provides:
//! - Envelope parsing (`nonce || ciphertext`) with strict bounds checking
//! - An AES-128-CTR stream cipher engine with in-place transform
//! - A pluggable key source capability
//! - The decrypt pipeline that owns the plaintext buffer until handoff
//!
//! # Security Invariants
//!
//! - The plaintext model exists only in process memory, never at rest
//! - Key material is wiped as soon as the cipher schedule is initialized
//! - Plaintext buffers zeroize on drop; neither `Key` nor `Plaintext`
//!   implements `Clone`
//! - The caller's ciphertext buffer is never mutated
//! - No retries, no recovery: every error is terminal for the attempt
//! - Direct use of `unsafe` is forbidden (#![forbid(unsafe_code)])
//! - Key and plaintext bytes are never logged; the only diagnostic surface
//!   for a key is its truncated SHA-256 fingerprint
//!
//! There is no authentication tag on the envelope. A wrong key or corrupted
//! ciphertext is not detectable at this layer; it surfaces downstream when
//! the model runtime rejects the bytes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod key;
pub mod pipeline;
pub mod plaintext;

pub use cipher::CipherState;
pub use envelope::{Envelope, NONCE_LEN};
pub use error::SealError;
pub use key::{EnvKey, FileKey, FixedKey, Key, KeySource, KEY_LEN};
pub use pipeline::{seal, unseal};
pub use plaintext::Plaintext;
