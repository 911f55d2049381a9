//! Interceptor functionality
//!
//! This module contains the core functionality for building and
//! configuring method interceptors: the facade object, its builder, the
//! fluent hook-registration API and the error types.

mod builder;
mod error;
mod hooks;

use std::sync::{Arc, LazyLock, RwLock};

pub use builder::{InterceptorBuilder, InterceptorConfig};
pub use error::{HookError, Result};
pub use hooks::{ClassHook, MethodHookBuilder};

use crate::core::session::{self, LoadSession};
use crate::core::{DispatchStats, HookBundle, HookRegistry, Resolver};
use crate::invoke::{CallOutcome, Value};
use crate::reflect::{LoaderId, MemberDescriptor, ResolvedHandle};
use crate::runtime::HostRuntime;

// Global registry for the active interceptor
static ACTIVE_INTERCEPTOR: LazyLock<RwLock<Option<Arc<Interceptor>>>> = LazyLock::new(|| RwLock::new(None));

/// Main interceptor struct
///
/// Owns the hook registry and, once a target process has attached, the
/// resolver bound to that process's classloader. Domain code registers
/// hooks through [`Interceptor::class`] or [`Interceptor::register`]; the
/// host runtime feeds every real call into [`Interceptor::dispatch`].
pub struct Interceptor {
	config: InterceptorConfig,
	runtime: Arc<dyn HostRuntime>,
	registry: HookRegistry,
	// Rebuilt on every attach; None until the first attach event.
	resolver: RwLock<Option<Arc<Resolver>>>,
}

impl std::fmt::Debug for Interceptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Interceptor")
			.field("config", &self.config)
			.field("registry", &self.registry)
			.field("attached", &self.resolver.read().unwrap().is_some())
			.finish()
	}
}

impl Interceptor {
	/// Create a new interceptor
	///
	/// This is typically called by the `InterceptorBuilder` and not directly.
	pub(crate) fn new(config: InterceptorConfig, runtime: Arc<dyn HostRuntime>) -> Self {
		let registry = HookRegistry::new(Arc::clone(&runtime), config.trace);
		Self {
			config,
			runtime,
			registry,
			resolver: RwLock::new(None),
		}
	}

	/// Handle an attach event for a new target process
	///
	/// Replaces the load session, binds a fresh resolver to the supplied
	/// classloader and drops all registry state; nothing is carried over
	/// from a previously attached process.
	pub fn attach(&self, loader: LoaderId, package_name: &str) -> Arc<LoadSession> {
		let session = session::attach(LoadSession::new(loader, package_name));
		*self.resolver.write().unwrap() = Some(Arc::new(Resolver::new(Arc::clone(&self.runtime), loader)));
		self.registry.clear();
		session
	}

	/// Drop the load session and all registry state
	pub fn detach(&self) {
		session::detach();
		*self.resolver.write().unwrap() = None;
		self.registry.clear();
		tracing::info!("interceptor detached");
	}

	/// The active load session, if any attach has happened
	#[must_use]
	pub fn session(&self) -> Option<Arc<LoadSession>> {
		session::current()
	}

	/// The resolver bound to the attached process
	pub fn resolver(&self) -> Result<Arc<Resolver>> {
		self.resolver.read().unwrap().clone().ok_or(HookError::NoSession)
	}

	/// Start a fluent hook registration against one class
	///
	/// Resolves the class immediately, so an unknown name fails here with
	/// [`HookError::ClassResolution`] rather than at install time.
	pub fn class(&self, name: &str) -> Result<ClassHook<'_>> {
		let resolver = self.resolver()?;
		resolver.class(name)?;
		Ok(ClassHook::new(self, name))
	}

	/// Resolve a descriptor and register one bundle per resolved handle
	///
	/// Each handle receives its own bundle instance; callbacks are shared,
	/// bundle ownership is not. Returns the resolved handles so callers
	/// can decide whether an empty match-all result is fatal. A bundle
	/// with neither callback is rejected before anything resolves, since
	/// registering it would install an intercept that can never act.
	pub fn register(&self, descriptor: &MemberDescriptor, bundle: &HookBundle) -> Result<Vec<ResolvedHandle>> {
		if bundle.is_empty() {
			return Err(HookError::Other("hook bundle carries no callbacks".to_string()));
		}
		let resolver = self.resolver()?;
		let handles = resolver.resolve(descriptor)?;
		for handle in &handles {
			self.registry.register(handle, bundle.clone())?;
		}
		tracing::debug!(
			class = %descriptor.class_name,
			member = descriptor.member_name(),
			handles = handles.len(),
			"hook registered"
		);
		Ok(handles)
	}

	/// Dispatch entry point for the host runtime
	///
	/// Called once per real call to an intercepted member; returns the
	/// call's final outcome after the full before/original/after chain.
	pub fn dispatch(&self, handle: &ResolvedHandle, receiver: Option<Value>, args: Vec<Value>) -> CallOutcome {
		self.registry.dispatch(handle, receiver, args)
	}

	/// The hook registry
	#[must_use]
	pub const fn registry(&self) -> &HookRegistry {
		&self.registry
	}

	/// Get a clone of the current dispatch statistics
	#[must_use]
	pub fn stats(&self) -> Option<DispatchStats> {
		self.registry.stats()
	}

	/// The interceptor's configuration
	#[must_use]
	pub const fn config(&self) -> &InterceptorConfig {
		&self.config
	}
}

/// Get the active interceptor
#[must_use]
pub fn active() -> Option<Arc<Interceptor>> {
	ACTIVE_INTERCEPTOR.read().unwrap().clone()
}

/// Set the active interceptor
pub(crate) fn set_active(interceptor: Arc<Interceptor>) {
	*ACTIVE_INTERCEPTOR.write().unwrap() = Some(interceptor);
}
