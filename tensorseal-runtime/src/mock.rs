//! In-memory mock runtime for tests.
//!
//! Parses a tiny deterministic model format, records every build/release
//! event in order, and can be scripted to fail at a chosen stage. This is
//! what the integration tests drive the loaders against; it is exported so
//! downstream crates can test their own plumbing without a real inference
//! engine.
//!
//! Mock model format:
//! ```text
//! +-----------+------------------+-------------------+----------------+
//! | "TSM1"    | input_len u32 LE | output_len u32 LE | ignored bytes  |
//! +-----------+------------------+-------------------+----------------+
//! ```
//!
//! Only the magic and header length are validated at parse time; tensor
//! sizes are taken at face value, like a real runtime taking shapes from
//! the graph.

use std::cell::{Cell, RefCell};

use crate::runtime::ModelRuntime;

/// Leading magic of the mock model format.
pub const MOCK_MAGIC: &[u8; 4] = b"TSM1";

/// Header length: magic + two u32 tensor sizes.
const HEADER_LEN: usize = 12;

/// Build a structurally valid minimal model blob with one input and one
/// output tensor of the given byte sizes.
pub fn model_blob(input_len: u32, output_len: u32) -> Vec<u8> {
    let mut blob = Vec::with_capacity(HEADER_LEN);
    blob.extend_from_slice(MOCK_MAGIC);
    blob.extend_from_slice(&input_len.to_le_bytes());
    blob.extend_from_slice(&output_len.to_le_bytes());
    blob
}

/// Lifecycle events, recorded in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Model parsed.
    ModelBuilt,
    /// Options handle created.
    OptionsBuilt,
    /// Interpreter constructed.
    InterpreterBuilt,
    /// Options handle released.
    OptionsReleased,
    /// Tensor storage allocated.
    TensorsAllocated,
    /// Forward pass ran.
    Invoked,
    /// Interpreter handle released.
    InterpreterReleased,
    /// Model handle released.
    ModelReleased,
}

/// Stage at which the mock should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// `build_interpreter` returns `None`.
    Interpreter,
    /// `allocate_tensors` returns `false`.
    Allocate,
    /// `invoke` returns `false`.
    Invoke,
}

/// Parsed mock model handle.
#[derive(Debug)]
pub struct MockModel {
    input_len: usize,
    output_len: usize,
}

/// Mock interpreter handle.
#[derive(Debug)]
pub struct MockInterpreter {
    input: Vec<u8>,
    output: Vec<u8>,
    input_len: usize,
    output_len: usize,
    allocated: bool,
}

/// Mock options handle.
#[derive(Debug)]
pub struct MockOptions {
    threads: i32,
}

/// A scriptable in-memory model runtime.
///
/// Interior mutability keeps the `ModelRuntime` methods `&self`; the mock
/// is single-threaded by construction, like the call chain it stands in
/// for.
#[derive(Debug, Default)]
pub struct MockRuntime {
    fail: Cell<Option<FailPoint>>,
    events: RefCell<Vec<Event>>,
    last_threads: Cell<Option<i32>>,
}

impl MockRuntime {
    /// Create a mock that succeeds at every stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails at the given stage.
    pub fn failing_at(point: FailPoint) -> Self {
        let runtime = Self::default();
        runtime.fail.set(Some(point));
        runtime
    }

    /// Snapshot of recorded lifecycle events, in call order.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Thread count of the most recently constructed interpreter.
    pub fn last_thread_count(&self) -> Option<i32> {
        self.last_threads.get()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl ModelRuntime for MockRuntime {
    type Model = MockModel;
    type Options = MockOptions;
    type Interpreter = MockInterpreter;

    fn build_model(&self, bytes: &[u8]) -> Option<MockModel> {
        if bytes.len() < HEADER_LEN || &bytes[..4] != MOCK_MAGIC {
            return None;
        }
        let input_len = u32::from_le_bytes(bytes[4..8].try_into().ok()?) as usize;
        let output_len = u32::from_le_bytes(bytes[8..12].try_into().ok()?) as usize;

        self.record(Event::ModelBuilt);
        Some(MockModel {
            input_len,
            output_len,
        })
    }

    fn build_options(&self) -> MockOptions {
        self.record(Event::OptionsBuilt);
        MockOptions { threads: 1 }
    }

    fn set_thread_count(&self, options: &mut MockOptions, threads: i32) {
        options.threads = threads;
    }

    fn build_interpreter(
        &self,
        model: &MockModel,
        options: &MockOptions,
    ) -> Option<MockInterpreter> {
        if self.fail.get() == Some(FailPoint::Interpreter) {
            return None;
        }
        self.record(Event::InterpreterBuilt);
        self.last_threads.set(Some(options.threads));
        Some(MockInterpreter {
            input: Vec::new(),
            output: Vec::new(),
            input_len: model.input_len,
            output_len: model.output_len,
            allocated: false,
        })
    }

    fn release_options(&self, _options: MockOptions) {
        self.record(Event::OptionsReleased);
    }

    fn allocate_tensors(&self, interpreter: &mut MockInterpreter) -> bool {
        if self.fail.get() == Some(FailPoint::Allocate) {
            return false;
        }
        // Poison until filled, so an unfilled input is visible
        interpreter.input = vec![0xFF; interpreter.input_len];
        interpreter.output = vec![0; interpreter.output_len];
        interpreter.allocated = true;
        self.record(Event::TensorsAllocated);
        true
    }

    fn input_byte_size(&self, interpreter: &MockInterpreter, index: usize) -> Option<usize> {
        (interpreter.allocated && index == 0).then_some(interpreter.input_len)
    }

    fn fill_input(&self, interpreter: &mut MockInterpreter, index: usize, value: u8) -> bool {
        if !interpreter.allocated || index != 0 {
            return false;
        }
        interpreter.input.fill(value);
        true
    }

    fn invoke(&self, interpreter: &mut MockInterpreter) -> bool {
        if self.fail.get() == Some(FailPoint::Invoke) {
            return false;
        }
        if !interpreter.allocated {
            return false;
        }
        // Deterministic "forward pass": output depends on every input byte
        // and is always non-zero.
        let sum = interpreter
            .input
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        interpreter.output.fill(sum | 1);
        self.record(Event::Invoked);
        true
    }

    fn output_byte_size(&self, interpreter: &MockInterpreter, index: usize) -> Option<usize> {
        (interpreter.allocated && index == 0).then_some(interpreter.output_len)
    }

    fn release_interpreter(&self, _interpreter: MockInterpreter) {
        self.record(Event::InterpreterReleased);
    }

    fn release_model(&self, _model: MockModel) {
        self.record(Event::ModelReleased);
    }
}
