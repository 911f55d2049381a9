//! Hook bundles
//!
//! A bundle is one registrant's before/after callback pair for a single
//! resolved member. Bundles are owned exclusively by the registry entry
//! they are attached to and run in registration order at dispatch.

use std::sync::Arc;

use crate::interceptor::Result;
use crate::invoke::InvocationContext;

/// Callback run before the original body
///
/// May rewrite arguments per slot and may short-circuit the original by
/// setting a result or a failure on the context. An `Err` is logged and
/// isolated; it never aborts the dispatch.
pub type BeforeCallback = dyn Fn(&mut InvocationContext) -> Result<()> + Send + Sync;

/// Callback run after the original body (or its suppression)
///
/// Additionally observes the in-flight result or failure and may replace
/// either with the other.
pub type AfterCallback = dyn Fn(&mut InvocationContext) -> Result<()> + Send + Sync;

/// One registrant's capability set on a single handle
#[derive(Clone, Default)]
pub struct HookBundle {
	// Position in the entry's registration order; assigned by the registry.
	ordinal: u64,
	before: Option<Arc<BeforeCallback>>,
	after: Option<Arc<AfterCallback>>,
}

impl std::fmt::Debug for HookBundle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookBundle")
			.field("ordinal", &self.ordinal)
			.field("before", &self.before.is_some())
			.field("after", &self.after.is_some())
			.finish()
	}
}

impl HookBundle {
	/// Create an empty bundle
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach a before-callback
	#[must_use]
	pub fn with_before<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut InvocationContext) -> Result<()> + Send + Sync + 'static,
	{
		self.before = Some(Arc::new(f));
		self
	}

	/// Attach an after-callback
	#[must_use]
	pub fn with_after<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut InvocationContext) -> Result<()> + Send + Sync + 'static,
	{
		self.after = Some(Arc::new(f));
		self
	}

	/// Whether the bundle carries neither callback
	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.before.is_none() && self.after.is_none()
	}

	/// The bundle's position in its entry's registration order
	#[must_use]
	pub const fn ordinal(&self) -> u64 {
		self.ordinal
	}

	pub(crate) fn assign_ordinal(&mut self, ordinal: u64) {
		self.ordinal = ordinal;
	}

	pub(crate) fn before(&self) -> Option<&BeforeCallback> {
		self.before.as_deref()
	}

	pub(crate) fn after(&self) -> Option<&AfterCallback> {
		self.after.as_deref()
	}
}
