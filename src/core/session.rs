//! Load session state
//!
//! One load session exists per attached target process: the classloader
//! to resolve types through and the package identity of the process. The
//! attach-handling collaborator sets it exactly once per attach event; a
//! re-attach fully replaces it, there is no merging. Writes are rare and
//! reads vastly outnumber them, so a plain `RwLock` slot suffices.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::reflect::LoaderId;

/// Identity of the process currently being instrumented
#[derive(Debug, Clone)]
pub struct LoadSession {
	/// The classloader all type-name resolution goes through
	pub loader: LoaderId,
	/// Package identity of the target process
	pub package_name: String,
}

impl LoadSession {
	/// Create a session record for one attach event
	#[must_use]
	pub fn new(loader: LoaderId, package_name: impl Into<String>) -> Self {
		Self {
			loader,
			package_name: package_name.into(),
		}
	}
}

// Process-wide slot for the active session
static ACTIVE_SESSION: Lazy<RwLock<Option<Arc<LoadSession>>>> = Lazy::new(|| RwLock::new(None));

/// Replace the active load session
///
/// Called once per attach event, before any resolution or registration is
/// attempted against the new process.
pub fn attach(session: LoadSession) -> Arc<LoadSession> {
	let session = Arc::new(session);
	*ACTIVE_SESSION.write().unwrap() = Some(Arc::clone(&session));
	tracing::info!(package = %session.package_name, loader = %session.loader, "load session attached");
	session
}

/// Get the active load session, if any attach has happened
#[must_use]
pub fn current() -> Option<Arc<LoadSession>> {
	ACTIVE_SESSION.read().unwrap().clone()
}

/// Drop the active load session
pub(crate) fn detach() {
	*ACTIVE_SESSION.write().unwrap() = None;
}
