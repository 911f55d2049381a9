//! Per-call invocation context
//!
//! One `InvocationContext` is built per real call and threaded by
//! reference through every registered callback, then discarded. It is
//! stack-local to the dispatching thread and never shared, so concurrent
//! dispatches on the same handle cannot observe each other's state.

use std::sync::Arc;

use crate::interceptor::{HookError, Result};
use crate::invoke::{CallOutcome, Thrown, Value};
use crate::reflect::ResolvedHandle;

/// Transient record of one intercepted call
///
/// Before-callbacks may rewrite arguments per slot and may short-circuit
/// the original body by setting a result (or a failure). After-callbacks
/// additionally observe the post-call outcome and may replace it in
/// either direction. The argument count and the declared handle are
/// fixed for the lifetime of the context.
#[derive(Debug)]
pub struct InvocationContext {
	handle: Arc<ResolvedHandle>,
	receiver: Option<Value>,
	args: Vec<Value>,
	result: Option<Value>,
	thrown: Option<Thrown>,
	skip_original: bool,
}

impl InvocationContext {
	pub(crate) fn new(handle: Arc<ResolvedHandle>, receiver: Option<Value>, args: Vec<Value>) -> Self {
		Self {
			handle,
			receiver,
			args,
			result: None,
			thrown: None,
			skip_original: false,
		}
	}

	/// The declared member this call targets
	#[must_use]
	pub fn handle(&self) -> &ResolvedHandle {
		&self.handle
	}

	/// The receiver, absent for constructors and static calls
	#[must_use]
	pub const fn receiver(&self) -> Option<&Value> {
		self.receiver.as_ref()
	}

	/// The current argument sequence
	#[must_use]
	pub fn args(&self) -> &[Value] {
		&self.args
	}

	/// Read one argument slot
	#[must_use]
	pub fn arg(&self, index: usize) -> Option<&Value> {
		self.args.get(index)
	}

	/// Replace one argument slot
	///
	/// Replacement is strictly per-slot; the argument count cannot change.
	pub fn set_arg(&mut self, index: usize, value: Value) -> Result<()> {
		let arity = self.args.len();
		match self.args.get_mut(index) {
			Some(slot) => {
				*slot = value;
				Ok(())
			},
			None => Err(HookError::ArgIndex { index, arity }),
		}
	}

	/// The result slot, unset until a callback or the original body sets it
	#[must_use]
	pub const fn result(&self) -> Option<&Value> {
		self.result.as_ref()
	}

	/// Set the result slot
	///
	/// Clears any pending failure. During the before phase this also
	/// suppresses the original body; later before-callbacks still run and
	/// may overwrite the value (last writer wins).
	pub fn set_result(&mut self, value: Value) {
		self.result = Some(value);
		self.thrown = None;
		self.skip_original = true;
	}

	/// The failure slot, set when the original body (or a callback) raised
	#[must_use]
	pub const fn thrown(&self) -> Option<&Thrown> {
		self.thrown.as_ref()
	}

	/// Set the failure slot
	///
	/// Clears any pending result. During the before phase this also
	/// suppresses the original body, symmetric with [`set_result`].
	///
	/// [`set_result`]: InvocationContext::set_result
	pub fn set_thrown(&mut self, thrown: Thrown) {
		self.thrown = Some(thrown);
		self.result = None;
		self.skip_original = true;
	}

	/// Whether a before-callback has suppressed the original body
	#[must_use]
	pub const fn will_skip_original(&self) -> bool {
		self.skip_original
	}

	// Outcome recording for the original body: fills the slots without
	// touching the skip flag, which is meaningless after the call point.
	pub(crate) fn record_outcome(&mut self, outcome: CallOutcome) {
		match outcome {
			CallOutcome::Return(v) => {
				self.result = Some(v);
				self.thrown = None;
			},
			CallOutcome::Thrown(t) => {
				self.thrown = Some(t);
				self.result = None;
			},
		}
	}

	// Final slot state, as returned to the host runtime. An empty result
	// slot degrades to a null return rather than crashing the target.
	pub(crate) fn into_outcome(self) -> CallOutcome {
		if let Some(t) = self.thrown {
			CallOutcome::Thrown(t)
		} else {
			CallOutcome::Return(self.result.unwrap_or(Value::Null))
		}
	}
}
