//! Hook registry and dispatch
//!
//! Process-wide table keyed by resolved handle. Each entry holds the
//! ordered bundles registered against that member and guarantees the host
//! runtime's low-level intercept is installed at most once per handle, no
//! matter how many registrations target it. The single dispatch entry
//! point multiplexes every real call through the entry's bundle chain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::bundle::HookBundle;
use crate::interceptor::Result;
use crate::invoke::{CallOutcome, InvocationContext, Value};
use crate::reflect::ResolvedHandle;
use crate::runtime::HostRuntime;

/// Statistics about intercepted dispatches
#[derive(Debug, Default, Clone)]
pub struct DispatchStats {
	/// Total number of dispatched calls on registered handles
	pub total_dispatches: usize,
	/// Number of dispatches where a before-callback suppressed the original
	pub skipped_originals: usize,
	/// Number of callback failures isolated during dispatch
	pub callback_failures: usize,
	/// Dispatch count per handle
	pub dispatch_counts: HashMap<ResolvedHandle, usize>,
}

impl DispatchStats {
	fn increment(&mut self, handle: &ResolvedHandle) {
		self.total_dispatches += 1;
		*self.dispatch_counts.entry(handle.clone()).or_insert(0) += 1;
	}

	const fn mark_skipped(&mut self) {
		self.skipped_originals += 1;
	}

	const fn mark_callback_failure(&mut self) {
		self.callback_failures += 1;
	}
}

struct RegistryEntry {
	handle: Arc<ResolvedHandle>,
	// registration order; a dispatch iterates a snapshot of this list
	bundles: Vec<Arc<HookBundle>>,
	installed: bool,
	// an install is in flight; later registrants append and move on
	installing: bool,
}

/// Process-wide hook table and dispatch multiplexer
pub struct HookRegistry {
	runtime: Arc<dyn HostRuntime>,
	entries: Mutex<HashMap<ResolvedHandle, RegistryEntry>>,
	stats: Mutex<DispatchStats>,
	trace: bool,
}

impl std::fmt::Debug for HookRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookRegistry")
			.field("entries", &self.entries.lock().unwrap().len())
			.field("trace", &self.trace)
			.finish()
	}
}

impl HookRegistry {
	/// Create an empty registry backed by the given host runtime
	#[must_use]
	pub fn new(runtime: Arc<dyn HostRuntime>, trace: bool) -> Self {
		Self {
			runtime,
			entries: Mutex::new(HashMap::new()),
			stats: Mutex::new(DispatchStats::default()),
			trace,
		}
	}

	/// Append a bundle to a handle's entry, installing the intercept once
	///
	/// The first registration against a handle installs the host runtime's
	/// low-level intercept; every later one only appends. Installing twice
	/// would corrupt the runtime's redirection state, so the first
	/// registrant claims the install under the registry lock and performs
	/// it with the lock released; a racing registrant sees the claim and
	/// only appends. The registry lock is never held across a host-runtime
	/// call, so a slow install cannot stall dispatches on other handles.
	/// An install failure is surfaced to this registrant and removes the
	/// whole entry, including any bundle that raced the failing install.
	pub fn register(&self, handle: &ResolvedHandle, mut bundle: HookBundle) -> Result<()> {
		let claimed_install = {
			let mut entries = self.entries.lock().unwrap();
			let entry = entries.entry(handle.clone()).or_insert_with(|| RegistryEntry {
				handle: Arc::new(handle.clone()),
				bundles: Vec::new(),
				installed: false,
				installing: false,
			});
			bundle.assign_ordinal(entry.bundles.len() as u64);
			entry.bundles.push(Arc::new(bundle));
			if entry.installed || entry.installing {
				false
			} else {
				entry.installing = true;
				true
			}
		};

		if claimed_install {
			if let Err(e) = self.runtime.install_intercept(handle) {
				self.entries.lock().unwrap().remove(handle);
				tracing::error!(handle = %handle, error = %e, "intercept install failed");
				return Err(e);
			}
			if let Some(entry) = self.entries.lock().unwrap().get_mut(handle) {
				entry.installed = true;
				entry.installing = false;
			}
			tracing::debug!(handle = %handle, "intercept installed");
		}

		Ok(())
	}

	/// Dispatch one real call through the handle's bundle chain
	///
	/// Invoked by the host runtime on every call to an intercepted member.
	/// The bundle list is snapshotted at dispatch start, so a concurrent
	/// registration is never visible mid-iteration. Before-callbacks run
	/// in ascending registration order (last writer wins on the result
	/// slot); unless one of them suppressed it, the original body runs
	/// with the possibly rewritten arguments; after-callbacks then run in
	/// the same order. A failing callback is logged and skipped, never
	/// allowed to take the whole chain down.
	pub fn dispatch(&self, handle: &ResolvedHandle, receiver: Option<Value>, args: Vec<Value>) -> CallOutcome {
		let snapshot = {
			let entries = self.entries.lock().unwrap();
			entries.get(handle).map(|e| (Arc::clone(&e.handle), e.bundles.clone()))
		};

		// An unregistered handle passes straight through to the original.
		let Some((handle, bundles)) = snapshot else {
			return self.runtime.invoke_original(handle, receiver.as_ref(), &args);
		};

		if self.trace {
			tracing::debug!(handle = %handle, args = args.len(), "dispatching intercepted call");
		}
		if let Ok(mut stats) = self.stats.lock() {
			stats.increment(&handle);
		}

		let mut ctx = InvocationContext::new(Arc::clone(&handle), receiver, args);

		for bundle in &bundles {
			if let Some(before) = bundle.before()
				&& let Err(e) = before(&mut ctx)
			{
				self.note_callback_failure(&handle, bundle.ordinal(), "before", &e);
			}
		}

		if ctx.will_skip_original() {
			if let Ok(mut stats) = self.stats.lock() {
				stats.mark_skipped();
			}
		} else {
			let outcome = self.runtime.invoke_original(&handle, ctx.receiver(), ctx.args());
			ctx.record_outcome(outcome);
		}

		for bundle in &bundles {
			if let Some(after) = bundle.after()
				&& let Err(e) = after(&mut ctx)
			{
				self.note_callback_failure(&handle, bundle.ordinal(), "after", &e);
			}
		}

		ctx.into_outcome()
	}

	/// Number of handles with at least one registered bundle
	#[must_use]
	pub fn entry_count(&self) -> usize {
		self.entries.lock().unwrap().len()
	}

	/// Number of bundles registered against a handle
	#[must_use]
	pub fn bundle_count(&self, handle: &ResolvedHandle) -> usize {
		self.entries.lock().unwrap().get(handle).map_or(0, |e| e.bundles.len())
	}

	/// Get a clone of the current dispatch statistics
	#[must_use]
	pub fn stats(&self) -> Option<DispatchStats> {
		self.stats.lock().ok().map(|stats| stats.clone())
	}

	/// Drop every entry and reset statistics
	///
	/// Used on re-attach: registry state is rebuilt from zero per target
	/// process, never carried across attaches.
	pub fn clear(&self) {
		self.entries.lock().unwrap().clear();
		if let Ok(mut stats) = self.stats.lock() {
			*stats = DispatchStats::default();
		}
	}

	fn note_callback_failure(&self, handle: &ResolvedHandle, ordinal: u64, phase: &str, error: &crate::interceptor::HookError) {
		if let Ok(mut stats) = self.stats.lock() {
			stats.mark_callback_failure();
		}
		tracing::warn!(handle = %handle, ordinal, phase, error = %error, "callback failed; continuing chain");
	}
}
