//! Host runtime boundary
//!
//! The privileged runtime that performs the actual bytecode-level
//! redirection sits behind this trait. The core consumes exactly three
//! capabilities from it (named type resolution, intercept installation
//! and original-body invocation) and never bypasses it for redirection.
//! After a successful [`install_intercept`], the host runtime is expected
//! to route every real call to the member into
//! [`Interceptor::dispatch`](crate::Interceptor::dispatch) and to use the
//! returned [`CallOutcome`] as the call's outcome.
//!
//! [`install_intercept`]: HostRuntime::install_intercept

use std::sync::Arc;

use crate::interceptor::Result;
use crate::invoke::{CallOutcome, Value};
use crate::reflect::{ClassInfo, FieldHandle, LoaderId, ResolvedHandle};

/// Capabilities the core requires from the privileged host runtime
pub trait HostRuntime: Send + Sync {
	/// Resolve a named type via the given classloader
	///
	/// Returns `None` when the loader cannot find the class; the resolver
	/// maps that to [`HookError::ClassResolution`](crate::HookError::ClassResolution)
	/// and propagates it.
	fn find_class(&self, loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>>;

	/// Force accessibility relaxation on a resolved member
	///
	/// Called once per match before the resolver returns it, since the
	/// call site sits outside normal visibility rules.
	fn relax_access(&self, _handle: &ResolvedHandle) {}

	/// Force accessibility relaxation on a resolved field
	fn relax_access_field(&self, _field: &FieldHandle) {}

	/// Install the low-level intercept for a resolved member
	///
	/// The registry guarantees at most one call per handle for the
	/// lifetime of a load session; a failure is surfaced to the
	/// registrant and never retried implicitly.
	fn install_intercept(&self, handle: &ResolvedHandle) -> Result<()>;

	/// Invoke the original, un-intercepted body
	///
	/// `receiver` is absent for constructors and static calls. The
	/// argument sequence is the possibly rewritten one from the before
	/// phase.
	fn invoke_original(&self, handle: &ResolvedHandle, receiver: Option<&Value>, args: &[Value]) -> CallOutcome;
}
