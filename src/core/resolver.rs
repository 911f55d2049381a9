//! Target resolver
//!
//! Turns a loose member description into concrete, reflectable handles:
//! exact name+signature lookup, all-overloads and all-constructors
//! expansion, and return-type / field-type search with optional
//! assignability widening. All lookup is declaring-type-only, inherited
//! members are never searched, and every match has its accessibility
//! relaxed before it is returned, since the call site sits outside normal
//! visibility rules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::index::ClassIndex;
use crate::interceptor::{HookError, Result};
use crate::reflect::{
	ConstructorInfo, FieldHandle, LoaderId, MemberDescriptor, MemberKind, MemberTarget, MethodInfo, ParamSpec, ResolvedHandle,
};
use crate::runtime::HostRuntime;

/// Resolves member descriptors against one classloader
///
/// A resolver is built per attach; its class cache holds the metadata
/// table of every class touched during that session, so repeated
/// registrations never rescan a class's member list.
pub struct Resolver {
	runtime: Arc<dyn HostRuntime>,
	loader: LoaderId,
	classes: Mutex<HashMap<String, Arc<ClassIndex>>>,
}

impl std::fmt::Debug for Resolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resolver")
			.field("loader", &self.loader)
			.field("cached_classes", &self.classes.lock().unwrap().len())
			.finish()
	}
}

impl Resolver {
	/// Create a resolver bound to one classloader
	#[must_use]
	pub fn new(runtime: Arc<dyn HostRuntime>, loader: LoaderId) -> Self {
		Self {
			runtime,
			loader,
			classes: Mutex::new(HashMap::new()),
		}
	}

	/// The classloader this resolver resolves through
	#[must_use]
	pub const fn loader(&self) -> LoaderId {
		self.loader
	}

	/// Resolve a class name to its indexed metadata, caching the result
	pub fn class(&self, name: &str) -> Result<Arc<ClassIndex>> {
		if let Some(index) = self.classes.lock().unwrap().get(name) {
			return Ok(Arc::clone(index));
		}

		let info = self
			.runtime
			.find_class(self.loader, name)
			.ok_or_else(|| HookError::ClassResolution(name.to_string()))?;
		let index = Arc::new(ClassIndex::new(info));
		self.classes.lock().unwrap().insert(name.to_string(), Arc::clone(&index));
		tracing::debug!(class = name, "class metadata indexed");
		Ok(index)
	}

	/// Resolve a member descriptor to zero or more concrete handles
	///
	/// Exact-match descriptors fail with [`HookError::NotFound`] when no
	/// declared member matches; there is no fallback to assignable-type
	/// matching. Match-all descriptors yield an empty sequence when
	/// nothing matches; callers decide whether that is fatal.
	pub fn resolve(&self, descriptor: &MemberDescriptor) -> Result<Vec<ResolvedHandle>> {
		let index = self.class(&descriptor.class_name)?;
		let class_name = index.name();

		let handles = match &descriptor.target {
			MemberTarget::Method {
				name,
				params: ParamSpec::Exact(params),
			} => {
				let method = index
					.methods_named(name)
					.find(|m| m.param_types == *params)
					.ok_or_else(|| HookError::NotFound {
						class: class_name.to_string(),
						member: name.clone(),
					})?;
				vec![method_handle(class_name, method)]
			},
			MemberTarget::Method {
				name,
				params: ParamSpec::AllOverloads,
			} => index.methods_named(name).map(|m| method_handle(class_name, m)).collect(),
			MemberTarget::AllMethods => index.methods().iter().map(|m| method_handle(class_name, m)).collect(),
			MemberTarget::Constructor { params: Some(params) } => {
				let ctor = index
					.constructors()
					.iter()
					.find(|c| c.param_types == *params)
					.ok_or_else(|| HookError::NotFound {
						class: class_name.to_string(),
						member: ResolvedHandle::CONSTRUCTOR_NAME.to_string(),
					})?;
				vec![constructor_handle(class_name, ctor)]
			},
			MemberTarget::Constructor { params: None } => {
				index.constructors().iter().map(|c| constructor_handle(class_name, c)).collect()
			},
		};

		for handle in &handles {
			self.runtime.relax_access(handle);
		}
		Ok(handles)
	}

	/// Every declared method whose return type matches the requested type
	///
	/// With `assignable` set, a return type that is a subtype of the
	/// requested type also matches. Matches are reported once per
	/// declaring member and never collapsed.
	pub fn methods_by_return_type(&self, class_name: &str, type_name: &str, assignable: bool) -> Result<Vec<ResolvedHandle>> {
		let index = self.class(class_name)?;
		let handles: Vec<ResolvedHandle> = index
			.methods()
			.iter()
			.filter(|m| self.type_matches(type_name, &m.return_type, assignable))
			.map(|m| method_handle(index.name(), m))
			.collect();

		for handle in &handles {
			self.runtime.relax_access(handle);
		}
		Ok(handles)
	}

	/// Every declared field whose type matches the requested type
	pub fn fields_by_type(&self, class_name: &str, type_name: &str, assignable: bool) -> Result<Vec<FieldHandle>> {
		let index = self.class(class_name)?;
		let fields: Vec<FieldHandle> = index
			.fields()
			.iter()
			.filter(|f| self.type_matches(type_name, &f.field_type, assignable))
			.map(|f| FieldHandle {
				class_name: index.name().to_string(),
				name: f.name.clone(),
				field_type: f.field_type.clone(),
			})
			.collect();

		for field in &fields {
			self.runtime.relax_access_field(field);
		}
		Ok(fields)
	}

	/// Whether `subtype` is `requested` itself or one of its subtypes
	///
	/// Walks the superclass and interface chains through the same class
	/// cache; a name the loader cannot resolve simply fails to match.
	#[must_use]
	pub fn is_assignable(&self, requested: &str, subtype: &str) -> bool {
		if requested == subtype {
			return true;
		}
		let Ok(index) = self.class(subtype) else {
			return false;
		};
		let info = index.info();
		if let Some(superclass) = &info.superclass
			&& self.is_assignable(requested, superclass)
		{
			return true;
		}
		info.interfaces.iter().any(|i| self.is_assignable(requested, i))
	}

	fn type_matches(&self, requested: &str, actual: &str, assignable: bool) -> bool {
		if assignable {
			self.is_assignable(requested, actual)
		} else {
			requested == actual
		}
	}
}

fn method_handle(class_name: &str, method: &MethodInfo) -> ResolvedHandle {
	ResolvedHandle {
		class_name: class_name.to_string(),
		kind: MemberKind::Method,
		name: method.name.clone(),
		param_types: method.param_types.clone(),
		return_type: method.return_type.clone(),
		is_static: method.is_static,
	}
}

fn constructor_handle(class_name: &str, ctor: &ConstructorInfo) -> ResolvedHandle {
	ResolvedHandle {
		class_name: class_name.to_string(),
		kind: MemberKind::Constructor,
		name: ResolvedHandle::CONSTRUCTOR_NAME.to_string(),
		param_types: ctor.param_types.clone(),
		// constructors report their declaring type
		return_type: class_name.to_string(),
		is_static: false,
	}
}
