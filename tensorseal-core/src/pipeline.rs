//! Secure decrypt pipeline.
//!
//! Orchestrates envelope parsing, key loading, and the cipher transform
//! into one synchronous operation per model. The pipeline owns the
//! plaintext buffer's lifetime until the caller hands it to the runtime.
//!
//! # Lifetime Invariants
//!
//! - The envelope and key exist only for the duration of one call
//! - The key is wiped as soon as the cipher schedule is initialized
//! - The caller's ciphertext buffer is never transformed in place; the
//!   body is copied into a freshly owned zeroizing buffer first
//! - The returned `Plaintext` zeroizes its storage on drop

use zeroize::Zeroizing;

use crate::cipher::CipherState;
use crate::envelope::{Envelope, NONCE_LEN};
use crate::error::SealError;
use crate::key::KeySource;
use crate::plaintext::Plaintext;

/// Decrypt a sealed model envelope into an owned plaintext buffer.
///
/// Decryption is a pure deterministic transform: a wrong key produces no
/// error here, only garbage bytes. With no authentication tag on the
/// envelope, invalidity surfaces downstream when the model runtime
/// rejects the plaintext.
///
/// # Errors
///
/// - `SealError::MalformedInput` if `raw` is shorter than the nonce
/// - `SealError::InvalidKey` if the key source fails
pub fn unseal(raw: &[u8], keys: &dyn KeySource) -> Result<Plaintext, SealError> {
    let envelope = Envelope::parse(raw)?;
    let key = keys.load()?;

    let mut cipher = CipherState::init(&key, envelope.nonce());
    // Schedule is built; the key itself is no longer needed
    drop(key);

    let mut buffer = Zeroizing::new(envelope.body().to_vec());
    cipher.transform(&mut buffer);

    Ok(Plaintext::new(buffer))
}

/// Seal plaintext model bytes into a `nonce || ciphertext` envelope.
///
/// The counter-mode transform is its own inverse, so this is the same
/// operation `unseal` performs. The caller supplies the nonce; it must be
/// unique per key (reuse leaks keystream).
///
/// # Errors
///
/// Returns `SealError::InvalidKey` if the key source fails.
pub fn seal(
    plaintext: &[u8],
    nonce: &[u8; NONCE_LEN],
    keys: &dyn KeySource,
) -> Result<Vec<u8>, SealError> {
    let key = keys.load()?;
    let mut cipher = CipherState::init(&key, nonce);
    drop(key);

    let mut out = Vec::with_capacity(NONCE_LEN + plaintext.len());
    out.extend_from_slice(nonce);
    out.extend_from_slice(plaintext);
    cipher.transform(&mut out[NONCE_LEN..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{FixedKey, KEY_LEN};

    const NONCE: [u8; NONCE_LEN] = [0x0Fu8; NONCE_LEN];

    fn keys() -> FixedKey {
        FixedKey::new([0x42; KEY_LEN])
    }

    #[test]
    fn test_round_trip() {
        let model = b"pretend this is a flatbuffer model blob";
        let sealed = seal(model, &NONCE, &keys()).unwrap();

        assert_eq!(sealed.len(), NONCE_LEN + model.len());
        assert_eq!(&sealed[..NONCE_LEN], &NONCE);
        // Body must actually be encrypted
        assert_ne!(&sealed[NONCE_LEN..], model.as_slice());

        let plaintext = unseal(&sealed, &keys()).unwrap();
        assert_eq!(plaintext.as_bytes(), model);
    }

    #[test]
    fn test_unseal_rejects_short_input() {
        assert!(matches!(
            unseal(&[0u8; NONCE_LEN - 1], &keys()),
            Err(SealError::MalformedInput)
        ));
    }

    #[test]
    fn test_unseal_empty_body() {
        let sealed = seal(&[], &NONCE, &keys()).unwrap();
        assert_eq!(sealed.len(), NONCE_LEN);
        let plaintext = unseal(&sealed, &keys()).unwrap();
        assert!(plaintext.is_empty());
    }

    #[test]
    fn test_wrong_key_is_silent_garbage() {
        let model = b"model bytes that only the right key recovers";
        let sealed = seal(model, &NONCE, &keys()).unwrap();

        // Wrong key: no error at this layer, just different bytes
        let wrong = FixedKey::new([0x43; KEY_LEN]);
        let plaintext = unseal(&sealed, &wrong).unwrap();
        assert_eq!(plaintext.len(), model.len());
        assert_ne!(plaintext.as_bytes(), model);
    }

    #[test]
    fn test_unseal_does_not_mutate_input() {
        let sealed = seal(b"some model", &NONCE, &keys()).unwrap();
        let before = sealed.clone();
        let _ = unseal(&sealed, &keys()).unwrap();
        assert_eq!(sealed, before);
    }
}
