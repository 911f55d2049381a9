//! Member descriptors and resolved handles
//!
//! A `MemberDescriptor` is the loose, human-supplied description of one or
//! more members ("this method with this signature", "every overload of
//! this name", "all constructors"). The resolver turns it into concrete
//! `ResolvedHandle`s, which are what the registry keys on.

/// Kind of an interceptable member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	/// An ordinary method, static or instance
	Method,
	/// A constructor
	Constructor,
}

/// How a named method's parameter list is matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
	/// Match the exact ordered parameter type list, nothing else
	Exact(Vec<String>),
	/// Match every declared overload of the name
	AllOverloads,
}

/// Which members of the owning class a descriptor selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberTarget {
	/// A named method, matched exactly or across all overloads
	Method {
		/// Method name
		name: String,
		/// Parameter matching mode
		params: ParamSpec,
	},
	/// Every declared method of the class, regardless of name
	AllMethods,
	/// Constructors; `None` means every declared constructor
	Constructor {
		/// Exact parameter type list, or `None` for all constructors
		params: Option<Vec<String>>,
	},
}

/// A loose description of one or more members of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
	/// Fully qualified name of the owning class
	pub class_name: String,
	/// The members selected within that class
	pub target: MemberTarget,
}

impl MemberDescriptor {
	/// Describe one method by exact signature
	#[must_use]
	pub fn method<S: Into<String>>(class_name: impl Into<String>, name: impl Into<String>, params: impl IntoIterator<Item = S>) -> Self {
		Self {
			class_name: class_name.into(),
			target: MemberTarget::Method {
				name: name.into(),
				params: ParamSpec::Exact(params.into_iter().map(Into::into).collect()),
			},
		}
	}

	/// Describe every overload of a method name
	#[must_use]
	pub fn method_all(class_name: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			class_name: class_name.into(),
			target: MemberTarget::Method {
				name: name.into(),
				params: ParamSpec::AllOverloads,
			},
		}
	}

	/// Describe every declared method of a class
	#[must_use]
	pub fn methods_all(class_name: impl Into<String>) -> Self {
		Self {
			class_name: class_name.into(),
			target: MemberTarget::AllMethods,
		}
	}

	/// Describe one constructor by exact signature
	#[must_use]
	pub fn constructor<S: Into<String>>(class_name: impl Into<String>, params: impl IntoIterator<Item = S>) -> Self {
		Self {
			class_name: class_name.into(),
			target: MemberTarget::Constructor {
				params: Some(params.into_iter().map(Into::into).collect()),
			},
		}
	}

	/// Describe every declared constructor of a class
	#[must_use]
	pub fn constructors_all(class_name: impl Into<String>) -> Self {
		Self {
			class_name: class_name.into(),
			target: MemberTarget::Constructor { params: None },
		}
	}

	/// The member name this descriptor asks for, for error reporting
	#[must_use]
	pub fn member_name(&self) -> &str {
		match &self.target {
			MemberTarget::Method { name, .. } => name,
			MemberTarget::AllMethods => "*",
			MemberTarget::Constructor { .. } => ResolvedHandle::CONSTRUCTOR_NAME,
		}
	}
}

/// A concrete, resolved reference to one method or constructor
///
/// Identity is the declaring class, kind, member name and exact parameter
/// type list; the return type rides along as metadata and does not take
/// part in equality.
#[derive(Debug, Clone)]
pub struct ResolvedHandle {
	/// Fully qualified name of the declaring class
	pub class_name: String,
	/// Member kind
	pub kind: MemberKind,
	/// Member name; [`ResolvedHandle::CONSTRUCTOR_NAME`] for constructors
	pub name: String,
	/// Exact parameter type names, in order
	pub param_types: Vec<String>,
	/// Return type name; constructors report their declaring class
	pub return_type: String,
	/// Whether the member takes no receiver
	pub is_static: bool,
}

impl ResolvedHandle {
	/// Member name under which constructors are resolved
	pub const CONSTRUCTOR_NAME: &'static str = "<init>";

	/// Number of argument slots a call to this member carries
	#[must_use]
	pub fn arity(&self) -> usize {
		self.param_types.len()
	}
}

impl PartialEq for ResolvedHandle {
	fn eq(&self, other: &Self) -> bool {
		self.class_name == other.class_name
			&& self.kind == other.kind
			&& self.name == other.name
			&& self.param_types == other.param_types
	}
}

impl Eq for ResolvedHandle {}

impl std::hash::Hash for ResolvedHandle {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.class_name.hash(state);
		self.kind.hash(state);
		self.name.hash(state);
		self.param_types.hash(state);
	}
}

impl std::fmt::Display for ResolvedHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}#{}({})", self.class_name, self.name, self.param_types.join(", "))
	}
}

/// A resolved reference to one declared field
///
/// Produced by the field-type search mode; fields are not interceptable,
/// so this never enters the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHandle {
	/// Fully qualified name of the declaring class
	pub class_name: String,
	/// Field name
	pub name: String,
	/// Field type name
	pub field_type: String,
}
