//! Model handoff adapter.
//!
//! Drives a decrypted model buffer through the runtime's minimal
//! allocate → invoke → inspect sequence. This is a bring-up check that the
//! decrypted graph is structurally executable, not a correctness check of
//! outputs: the input is synthetic zeros and no numeric validation is
//! performed.

use crate::error::HandoffError;
use crate::runtime::ModelRuntime;

/// Interpreter thread count. Fixed small constant; the runtime's own
/// tensor-op execution is the only parallelism in the system.
pub const INTERPRETER_THREADS: i32 = 2;

/// What the proof-of-life pass observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Byte size of the first input tensor.
    pub input_bytes: usize,
    /// Byte size of the first output tensor.
    pub output_bytes: usize,
}

/// Load a plaintext model into the runtime and verify it executes.
///
/// Sequence: parse model → build interpreter (options released as soon as
/// the interpreter exists) → allocate tensors → zero-fill the first input →
/// one forward pass → confirm the first output is non-empty. The first
/// failing step short-circuits the rest, but teardown always runs:
/// interpreter first, then model, on every exit path.
///
/// `plaintext` is borrowed for the duration of the call only; the runtime
/// copies what it needs.
///
/// # Errors
///
/// The first failing step's error. `ModelParseFailed` is the usual signal
/// that decryption used the wrong key or the envelope was corrupted.
pub fn load_and_verify<R: ModelRuntime>(
    runtime: &R,
    plaintext: &[u8],
) -> Result<LoadReport, HandoffError> {
    // Nothing acquired yet; a parse failure has nothing to release.
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

    let verdict = prove_alive(runtime, &mut interpreter);

    // Teardown ordering invariant: the interpreter holds references into
    // the model's graph structures. Interpreter first, model second.
    runtime.release_interpreter(interpreter);
    runtime.release_model(model);

    verdict
}

/// Allocate, run one synthetic forward pass, inspect the output.
///
/// Shared by the discard and keep loaders. The caller owns teardown.
pub(crate) fn prove_alive<R: ModelRuntime>(
    runtime: &R,
    interpreter: &mut R::Interpreter,
) -> Result<LoadReport, HandoffError> {
    if !runtime.allocate_tensors(interpreter) {
        return Err(HandoffError::TensorAllocationFailed);
    }

    // A graph whose first input tensor is absent or unwritable did not
    // come up with usable input storage.
    let input_bytes = match runtime.input_byte_size(interpreter, 0) {
        Some(size) => size,
        None => return Err(HandoffError::TensorAllocationFailed),
    };
    if !runtime.fill_input(interpreter, 0, 0) {
        return Err(HandoffError::TensorAllocationFailed);
    }

    if !runtime.invoke(interpreter) {
        return Err(HandoffError::InvokeFailed);
    }

    // Non-null, non-zero output is all this check claims.
    match runtime.output_byte_size(interpreter, 0) {
        Some(output_bytes) if output_bytes > 0 => Ok(LoadReport {
            input_bytes,
            output_bytes,
        }),
        _ => Err(HandoffError::OutputUnavailable),
    }
}
