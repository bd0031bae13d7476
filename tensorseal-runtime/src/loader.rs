//! Sealed-model loaders.
//!
//! Two distinct top-level operations share one decrypt pipeline and one
//! teardown discipline:
//!
//! - [`load_sealed_model`] — validate and discard. The bring-up check:
//!   prove the sealed model decrypts to an executable graph, then release
//!   everything.
//! - [`open_sealed_model`] — validate and keep. Same proof of life, but on
//!   success the runtime handles stay alive in a [`LoadedModel`] for
//!   repeated inference. The raw plaintext buffer is *not* retained either
//!   way; it is zeroized before these functions return.

use tensorseal_core::{unseal, KeySource};

use crate::error::HandoffError;
use crate::handoff::{load_and_verify, prove_alive, LoadReport, INTERPRETER_THREADS};
use crate::runtime::ModelRuntime;

/// Decrypt a sealed envelope, verify the model executes, release it.
///
/// The plaintext exists only inside this call: decrypted, borrowed by the
/// runtime for the validation sequence, then zeroized on return — success
/// or failure.
///
/// # Errors
///
/// `HandoffError::Seal` for envelope/key failures, otherwise the first
/// failing handoff step. A wrong key surfaces as `ModelParseFailed`.
pub fn load_sealed_model<R: ModelRuntime>(
    raw: &[u8],
    keys: &dyn KeySource,
    runtime: &R,
) -> Result<LoadReport, HandoffError> {
    let plaintext = unseal(raw, keys)?;
    load_and_verify(runtime, plaintext.as_bytes())
    // plaintext zeroizes here
}

/// Decrypt a sealed envelope, verify the model executes, keep it loaded.
///
/// On success the returned [`LoadedModel`] owns the runtime handles; the
/// raw plaintext buffer is zeroized before this returns (the runtime holds
/// its own parsed representation). On failure everything acquired is
/// released, interpreter before model.
///
/// # Errors
///
/// Same as [`load_sealed_model`].
pub fn open_sealed_model<'r, R: ModelRuntime>(
    raw: &[u8],
    keys: &dyn KeySource,
    runtime: &'r R,
) -> Result<LoadedModel<'r, R>, HandoffError> {
    let plaintext = unseal(raw, keys)?;
    LoadedModel::open(runtime, plaintext.as_bytes())
    // plaintext zeroizes here
}

/// A validated model held open for repeated inference.
///
/// Does not implement `Clone`: runtime handles have single owners. Release
/// is `close()` (consume-self) or defensive `Drop`; both release the
/// interpreter before the model.
pub struct LoadedModel<'r, R: ModelRuntime> {
    runtime: &'r R,
    model: Option<R::Model>,
    interpreter: Option<R::Interpreter>,
    report: LoadReport,
}

// Explicitly NOT implementing Clone
// impl Clone for LoadedModel { ... } // FORBIDDEN

impl<'r, R: ModelRuntime> LoadedModel<'r, R> {
    /// Load a plaintext model and keep it if the proof of life passes.
    ///
    /// # Errors
    ///
    /// The first failing handoff step; on error all acquired handles have
    /// been released in dependency order.
    pub fn open(runtime: &'r R, plaintext: &[u8]) -> Result<Self, HandoffError> {
        let model = match runtime.build_model(plaintext) {
            Some(model) => model,
            None => return Err(HandoffError::ModelParseFailed),
        };

        let mut options = runtime.build_options();
        runtime.set_thread_count(&mut options, INTERPRETER_THREADS);
        let interpreter = runtime.build_interpreter(&model, &options);
        runtime.release_options(options);

        let mut interpreter = match interpreter {
            Some(interpreter) => interpreter,
            None => {
                runtime.release_model(model);
                return Err(HandoffError::InterpreterCreateFailed);
            }
        };

        match prove_alive(runtime, &mut interpreter) {
            Ok(report) => Ok(Self {
                runtime,
                model: Some(model),
                interpreter: Some(interpreter),
                report,
            }),
            Err(e) => {
                runtime.release_interpreter(interpreter);
                runtime.release_model(model);
                Err(e)
            }
        }
    }

    /// What the proof-of-life pass observed.
    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// Run another forward pass on the retained interpreter.
    ///
    /// # Errors
    ///
    /// `HandoffError::InvokeFailed` if the runtime reports failure.
    pub fn invoke(&mut self) -> Result<(), HandoffError> {
        match self.interpreter.as_mut() {
            Some(interpreter) => {
                if self.runtime.invoke(interpreter) {
                    Ok(())
                } else {
                    Err(HandoffError::InvokeFailed)
                }
            }
            None => Err(HandoffError::InvokeFailed),
        }
    }

    /// Release the runtime handles, interpreter before model.
    ///
    /// Consumes `self`; the model cannot be used after close.
    pub fn close(mut self) {
        self.release();
        // Drop will run release() again; it is idempotent
    }

    /// Idempotent teardown shared by `close()` and `Drop`.
    fn release(&mut self) {
        if let Some(interpreter) = self.interpreter.take() {
            self.runtime.release_interpreter(interpreter);
        }
        if let Some(model) = self.model.take() {
            self.runtime.release_model(model);
        }
    }
}

impl<R: ModelRuntime> Drop for LoadedModel<'_, R> {
    fn drop(&mut self) {
        // Defensive release if close() was not called
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{model_blob, Event, FailPoint, MockRuntime};
    use tensorseal_core::{seal, FixedKey, NONCE_LEN};

    const NONCE: [u8; NONCE_LEN] = [0x07u8; NONCE_LEN];

    fn keys() -> FixedKey {
        FixedKey::new([0x42; 16])
    }

    fn sealed_model(input_len: u32, output_len: u32) -> Vec<u8> {
        seal(&model_blob(input_len, output_len), &NONCE, &keys()).unwrap()
    }

    #[test]
    fn test_load_sealed_model_ok() {
        let runtime = MockRuntime::new();
        let report = load_sealed_model(&sealed_model(32, 16), &keys(), &runtime).unwrap();
        assert_eq!(report.input_bytes, 32);
        assert_eq!(report.output_bytes, 16);
        // Discard variant: everything released
        assert_eq!(
            &runtime.events()[runtime.events().len() - 2..],
            &[Event::InterpreterReleased, Event::ModelReleased]
        );
    }

    #[test]
    fn test_load_sealed_model_short_envelope() {
        let runtime = MockRuntime::new();
        let result = load_sealed_model(&[0u8; 5], &keys(), &runtime);
        assert_eq!(
            result,
            Err(HandoffError::Seal(tensorseal_core::SealError::MalformedInput))
        );
    }

    #[test]
    fn test_open_keeps_handles_until_close() {
        let runtime = MockRuntime::new();
        let mut model = open_sealed_model(&sealed_model(8, 8), &keys(), &runtime).unwrap();

        // Handles are alive: no releases yet
        assert!(!runtime.events().contains(&Event::InterpreterReleased));
        assert!(!runtime.events().contains(&Event::ModelReleased));

        // Repeated inference works on the retained interpreter
        model.invoke().unwrap();
        model.invoke().unwrap();

        model.close();
        assert_eq!(
            &runtime.events()[runtime.events().len() - 2..],
            &[Event::InterpreterReleased, Event::ModelReleased]
        );
    }

    #[test]
    fn test_drop_releases_in_order() {
        let runtime = MockRuntime::new();
        {
            let _model = open_sealed_model(&sealed_model(8, 8), &keys(), &runtime).unwrap();
            // Dropped without close()
        }
        assert_eq!(
            &runtime.events()[runtime.events().len() - 2..],
            &[Event::InterpreterReleased, Event::ModelReleased]
        );
    }

    #[test]
    fn test_open_failure_releases_everything() {
        let runtime = MockRuntime::failing_at(FailPoint::Invoke);
        let result = open_sealed_model(&sealed_model(8, 8), &keys(), &runtime);
        assert!(matches!(result, Err(HandoffError::InvokeFailed)));

        let events = runtime.events();
        let interp = events
            .iter()
            .position(|e| *e == Event::InterpreterReleased)
            .unwrap();
        let model = events
            .iter()
            .position(|e| *e == Event::ModelReleased)
            .unwrap();
        assert!(interp < model);
    }

    #[test]
    fn test_wrong_key_surfaces_as_parse_failure() {
        let runtime = MockRuntime::new();
        let wrong = FixedKey::new([0x43; 16]);
        let result = load_sealed_model(&sealed_model(8, 8), &wrong, &runtime);
        assert_eq!(result, Err(HandoffError::ModelParseFailed));
    }
}
