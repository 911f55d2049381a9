//! Fluent hook registration
//!
//! The registration surface domain code actually uses: pick a class, pick
//! its members by name/signature/overload-set, attach before/after
//! callbacks, install. Each `hook()` call resolves the descriptor and
//! registers one bundle per resolved handle.

use crate::core::HookBundle;
use crate::interceptor::{Interceptor, Result};
use crate::invoke::InvocationContext;
use crate::reflect::{FieldHandle, MemberDescriptor, ResolvedHandle};

/// Hook-registration entry point for one class
///
/// Created by [`Interceptor::class`], which has already verified the
/// class resolves against the attached process's classloader.
#[derive(Debug)]
pub struct ClassHook<'a> {
	interceptor: &'a Interceptor,
	class_name: String,
}

impl<'a> ClassHook<'a> {
	pub(crate) fn new(interceptor: &'a Interceptor, class_name: &str) -> Self {
		Self {
			interceptor,
			class_name: class_name.to_string(),
		}
	}

	/// The class this hook targets
	#[must_use]
	pub fn name(&self) -> &str {
		&self.class_name
	}

	/// Target one method by exact signature
	pub fn method<S: Into<String>>(&self, name: impl Into<String>, params: impl IntoIterator<Item = S>) -> MethodHookBuilder<'a> {
		self.builder(MemberDescriptor::method(&self.class_name, name, params))
	}

	/// Target every declared overload of a method name
	pub fn method_all(&self, name: impl Into<String>) -> MethodHookBuilder<'a> {
		self.builder(MemberDescriptor::method_all(&self.class_name, name))
	}

	/// Target every declared method of the class
	pub fn methods_all(&self) -> MethodHookBuilder<'a> {
		self.builder(MemberDescriptor::methods_all(&self.class_name))
	}

	/// Target one constructor by exact signature
	pub fn constructor<S: Into<String>>(&self, params: impl IntoIterator<Item = S>) -> MethodHookBuilder<'a> {
		self.builder(MemberDescriptor::constructor(&self.class_name, params))
	}

	/// Target every declared constructor of the class
	pub fn constructors_all(&self) -> MethodHookBuilder<'a> {
		self.builder(MemberDescriptor::constructors_all(&self.class_name))
	}

	/// Every declared method whose return type matches the requested type
	pub fn methods_by_return_type(&self, type_name: &str, assignable: bool) -> Result<Vec<ResolvedHandle>> {
		self.interceptor
			.resolver()?
			.methods_by_return_type(&self.class_name, type_name, assignable)
	}

	/// Every declared field whose type matches the requested type
	pub fn fields_by_type(&self, type_name: &str, assignable: bool) -> Result<Vec<FieldHandle>> {
		self.interceptor.resolver()?.fields_by_type(&self.class_name, type_name, assignable)
	}

	fn builder(&self, descriptor: MemberDescriptor) -> MethodHookBuilder<'a> {
		MethodHookBuilder {
			interceptor: self.interceptor,
			descriptor,
			bundle: HookBundle::new(),
		}
	}
}

/// Builder for one callback bundle against one descriptor
#[derive(Debug)]
pub struct MethodHookBuilder<'a> {
	interceptor: &'a Interceptor,
	descriptor: MemberDescriptor,
	bundle: HookBundle,
}

impl MethodHookBuilder<'_> {
	/// Attach a before-callback
	#[must_use]
	pub fn before<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut InvocationContext) -> Result<()> + Send + Sync + 'static,
	{
		self.bundle = self.bundle.with_before(f);
		self
	}

	/// Attach an after-callback
	#[must_use]
	pub fn after<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut InvocationContext) -> Result<()> + Send + Sync + 'static,
	{
		self.bundle = self.bundle.with_after(f);
		self
	}

	/// Resolve the descriptor and register the bundle on every handle
	///
	/// Exact-match descriptors fail if the member does not exist;
	/// match-all descriptors may resolve to an empty handle list, which is
	/// returned as-is for the caller to judge. A builder that was given
	/// neither callback is rejected outright.
	pub fn hook(self) -> Result<Vec<ResolvedHandle>> {
		self.interceptor.register(&self.descriptor, &self.bundle)
	}
}
