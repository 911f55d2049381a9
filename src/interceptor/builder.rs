//! Builder for creating interceptors
//!
//! This module contains the `InterceptorBuilder` struct and related
//! functionality for configuring and building interceptors.

use std::sync::Arc;

use crate::interceptor::{HookError, Interceptor, Result};
use crate::runtime::HostRuntime;

/// Configuration for an interceptor
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
	/// Whether to log every dispatched call
	pub trace: bool,
}

impl Default for InterceptorConfig {
	fn default() -> Self {
		Self { trace: false }
	}
}

/// Builder for creating interceptors
///
/// This struct provides a builder pattern for configuring and
/// creating interceptors.
pub struct InterceptorBuilder {
	/// The configuration for the interceptor
	config: InterceptorConfig,
	/// The host runtime performing the actual redirection
	runtime: Option<Arc<dyn HostRuntime>>,
}

impl Default for InterceptorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for InterceptorBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InterceptorBuilder")
			.field("config", &self.config)
			.field("runtime", &if self.runtime.is_some() { "Some(runtime)" } else { "None" })
			.finish()
	}
}

impl InterceptorBuilder {
	/// Create a new interceptor builder with default settings
	#[must_use]
	pub fn new() -> Self {
		Self {
			config: InterceptorConfig::default(),
			runtime: None,
		}
	}

	/// Enable or disable dispatch tracing
	#[must_use]
	pub const fn trace(mut self, trace: bool) -> Self {
		self.config.trace = trace;
		self
	}

	/// Set the host runtime
	///
	/// Required; the core never performs redirection itself.
	#[must_use]
	pub fn runtime(mut self, runtime: Arc<dyn HostRuntime>) -> Self {
		self.runtime = Some(runtime);
		self
	}

	/// Build the interceptor and publish it as the active instance
	pub fn build(self) -> Result<Arc<Interceptor>> {
		let Some(runtime) = self.runtime else {
			return Err(HookError::Other("no host runtime supplied".to_string()));
		};

		crate::util::init_logging();

		let interceptor = Arc::new(Interceptor::new(self.config, runtime));
		crate::interceptor::set_active(Arc::clone(&interceptor));
		tracing::info!("interceptor built and registered as active");
		Ok(interceptor)
	}
}
