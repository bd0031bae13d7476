//! TensorSeal Runtime
//!
//! Model runtime handoff layer. This crate wraps `tensorseal-core` and
//! drives the decrypted model through an external inference runtime's
//! load / allocate / invoke sequence to prove it is structurally valid.
//!
//! The runtime itself (model parsing, tensor graph execution) is an
//! external collaborator, consumed through the [`ModelRuntime`] trait.
//!
//! # Security Invariants & Hard Failures
//!
//! - **One Strike**: the first failing step aborts the attempt; nothing is
//!   retried, since the pipeline is deterministic end to end.
//! - **Teardown Ordering**: the interpreter is released before the model
//!   on every exit path, success or failure. The interpreter holds
//!   references into the model's graph structures, so this ordering is an
//!   invariant, not an optimization.
//! - **No Duplication**: `LoadedModel` does not implement `Clone`.
//! - **Implicit Cleanup**: `Drop` defensively releases runtime handles if
//!   `close()` was not called.
//! - **Ephemeral Plaintext**: loaders borrow the decrypted buffer for the
//!   duration of the handoff only; it is zeroized before they return.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod error;
pub mod handoff;
pub mod loader;
pub mod mock;
pub mod runtime;

pub use error::HandoffError;
pub use handoff::{load_and_verify, LoadReport, INTERPRETER_THREADS};
pub use loader::{load_sealed_model, open_sealed_model, LoadedModel};
pub use runtime::ModelRuntime;
