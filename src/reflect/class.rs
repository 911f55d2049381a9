//! Per-class reflection metadata
//!
//! `ClassInfo` is the explicit metadata table the host runtime hands back
//! for one live class: declared members only, plus the superclass and
//! interface names needed for assignability checks. The resolver never
//! walks inherited members.

/// Opaque identity of a classloader inside the target process
///
/// The core never dereferences a loader; it only passes the identity back
/// through the host runtime boundary when resolving type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoaderId(pub u64);

impl std::fmt::Display for LoaderId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "loader#{}", self.0)
	}
}

/// Reflection metadata for one loaded class
#[derive(Debug, Clone)]
pub struct ClassInfo {
	/// Fully qualified class name
	pub name: String,
	/// Fully qualified superclass name, absent for root types
	pub superclass: Option<String>,
	/// Fully qualified names of directly implemented interfaces
	pub interfaces: Vec<String>,
	/// Declared methods, in declaration order
	pub methods: Vec<MethodInfo>,
	/// Declared constructors, in declaration order
	pub constructors: Vec<ConstructorInfo>,
	/// Declared fields, in declaration order
	pub fields: Vec<FieldInfo>,
}

/// One declared method
#[derive(Debug, Clone)]
pub struct MethodInfo {
	/// Method name
	pub name: String,
	/// Parameter type names, in order
	pub param_types: Vec<String>,
	/// Return type name (`void` for none)
	pub return_type: String,
	/// Whether the method is static (no receiver at dispatch)
	pub is_static: bool,
}

/// One declared constructor
#[derive(Debug, Clone)]
pub struct ConstructorInfo {
	/// Parameter type names, in order
	pub param_types: Vec<String>,
}

/// One declared field
#[derive(Debug, Clone)]
pub struct FieldInfo {
	/// Field name
	pub name: String,
	/// Field type name
	pub field_type: String,
}

impl ClassInfo {
	/// Create a class with no members, to be filled in by the host runtime
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			superclass: None,
			interfaces: Vec::new(),
			methods: Vec::new(),
			constructors: Vec::new(),
			fields: Vec::new(),
		}
	}
}
