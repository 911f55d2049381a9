//! hookpoint - A framework for building method interceptors
//!
//! This framework provides tools for intercepting method and constructor
//! invocations of already-loaded classes in a target process: loose
//! member descriptions are resolved against the live type system, one
//! low-level intercept is installed per resolved member, and every
//! registered before/after callback pair is multiplexed through a single
//! dispatch entry point.
//!
//! The privileged runtime that performs the actual redirection sits
//! behind the [`HostRuntime`] trait; the core never bypasses it.
//!
//! # Getting Started
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hookpoint::{CallOutcome, ClassInfo, HostRuntime, LoaderId, MethodInfo, ResolvedHandle, Value};
//!
//! struct StubRuntime;
//!
//! impl HostRuntime for StubRuntime {
//! 	fn find_class(&self, _loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
//! 		(name == "com.sample.Sample").then(|| {
//! 			let mut info = ClassInfo::new(name);
//! 			info.methods.push(MethodInfo {
//! 				name: "compute".to_string(),
//! 				param_types: vec!["int".to_string()],
//! 				return_type: "int".to_string(),
//! 				is_static: false,
//! 			});
//! 			Arc::new(info)
//! 		})
//! 	}
//!
//! 	fn install_intercept(&self, _handle: &ResolvedHandle) -> hookpoint::Result<()> {
//! 		Ok(())
//! 	}
//!
//! 	fn invoke_original(&self, _handle: &ResolvedHandle, _receiver: Option<&Value>, args: &[Value]) -> CallOutcome {
//! 		let n = args[0].as_int().unwrap_or(0);
//! 		CallOutcome::Return(Value::Int(n * 2))
//! 	}
//! }
//!
//! fn main() -> hookpoint::Result<()> {
//! 	let interceptor = hookpoint::new().runtime(Arc::new(StubRuntime)).build()?;
//! 	interceptor.attach(LoaderId(1), "com.sample.app");
//!
//! 	let handles = interceptor
//! 		.class("com.sample.Sample")?
//! 		.method("compute", ["int"])
//! 		.before(|ctx| {
//! 			let n = ctx.arg(0).and_then(Value::as_int).unwrap_or(0);
//! 			ctx.set_arg(0, Value::Int(n * 2))
//! 		})
//! 		.hook()?;
//!
//! 	// The host runtime routes every real call through dispatch.
//! 	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
//! 	assert_eq!(outcome, CallOutcome::Return(Value::Int(20)));
//! 	Ok(())
//! }
//! ```

pub mod core;
pub mod interceptor;
pub mod invoke;
pub mod reflect;
pub mod runtime;
pub mod util;

use std::sync::Arc;

pub use crate::core::{AfterCallback, BeforeCallback, ClassIndex, DispatchStats, HookBundle, HookRegistry, LoadSession, Resolver};
pub use crate::interceptor::{
	ClassHook, HookError, Interceptor, InterceptorBuilder, InterceptorConfig, MethodHookBuilder, Result, active,
};
pub use crate::invoke::{CallOutcome, InvocationContext, Thrown, Value};
pub use crate::reflect::{
	ClassInfo, ConstructorInfo, FieldHandle, FieldInfo, LoaderId, MemberDescriptor, MemberKind, MemberTarget, MethodInfo,
	ParamSpec, ResolvedHandle,
};
pub use crate::runtime::HostRuntime;

/// Create a new interceptor builder
#[must_use]
pub fn new() -> InterceptorBuilder {
	InterceptorBuilder::new()
}

/// Initialize hookpoint with default settings
///
/// This is equivalent to `new().runtime(runtime).build()`
pub fn init(runtime: Arc<dyn HostRuntime>) -> Result<Arc<Interceptor>> {
	new().runtime(runtime).build()
}

/// Shorthand for setting up an interceptor that logs every dispatch
pub fn trace(runtime: Arc<dyn HostRuntime>) -> Result<Arc<Interceptor>> {
	new().runtime(runtime).trace(true).build()
}
