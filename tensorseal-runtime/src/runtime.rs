//! Model runtime capability.
//!
//! The inference engine is an external collaborator. This trait is the
//! boundary: a set of given, stable, synchronous primitives mirroring a
//! C-style interpreter API (nullable constructors, boolean statuses,
//! explicit deletes). The handoff adapter translates these into typed
//! errors and owns the call ordering; implementations do not.
//!
//! Release methods are explicit rather than hidden in `Drop` so that the
//! interpreter-before-model teardown ordering is part of the visible
//! contract and can be observed by tests.

/// A synchronous model runtime.
///
/// Handles are opaque to the adapter: it holds them only long enough to
/// complete the validation sequence and must release them, interpreter
/// before model, on every exit path.
pub trait ModelRuntime {
    /// Parsed model handle.
    type Model;

    /// Interpreter construction options handle.
    type Options;

    /// Interpreter handle. Holds references into the model's graph
    /// structures, so it must be released before the model.
    type Interpreter;

    /// Parse model bytes. Returns `None` if the runtime rejects them.
    ///
    /// The runtime must copy whatever it needs out of `bytes`; the buffer
    /// is not valid past this call's enclosing handoff.
    fn build_model(&self, bytes: &[u8]) -> Option<Self::Model>;

    /// Create interpreter options with runtime defaults.
    fn build_options(&self) -> Self::Options;

    /// Set the interpreter thread count on an options handle.
    fn set_thread_count(&self, options: &mut Self::Options, threads: i32);

    /// Construct an interpreter bound to the model. Returns `None` on
    /// failure; the caller still owns (and must release) the model.
    fn build_interpreter(
        &self,
        model: &Self::Model,
        options: &Self::Options,
    ) -> Option<Self::Interpreter>;

    /// Release an options handle. Options are not needed once the
    /// interpreter exists.
    fn release_options(&self, options: Self::Options);

    /// Allocate tensor storage for the interpreter's graph.
    fn allocate_tensors(&self, interpreter: &mut Self::Interpreter) -> bool;

    /// Byte size of the input tensor at `index`, or `None` if it does not
    /// exist or is not allocated.
    fn input_byte_size(&self, interpreter: &Self::Interpreter, index: usize) -> Option<usize>;

    /// Fill the input tensor at `index` with a constant byte. Returns
    /// `false` if the tensor does not exist or is not writable.
    fn fill_input(&self, interpreter: &mut Self::Interpreter, index: usize, value: u8) -> bool;

    /// Run one forward pass.
    fn invoke(&self, interpreter: &mut Self::Interpreter) -> bool;

    /// Byte size of the output tensor at `index`, or `None` if it does
    /// not exist or is not allocated.
    fn output_byte_size(&self, interpreter: &Self::Interpreter, index: usize) -> Option<usize>;

    /// Release an interpreter handle. Must happen before the model it was
    /// built against is released.
    fn release_interpreter(&self, interpreter: Self::Interpreter);

    /// Release a model handle.
    fn release_model(&self, model: Self::Model);
}
