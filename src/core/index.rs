//! Per-class member index
//!
//! Dynamic name-based lookup over a live class is served from an explicit
//! table built exactly once per class per attach: declared methods are
//! indexed by name so repeated registrations against the same class never
//! rescan the full member list.

use std::collections::HashMap;
use std::sync::Arc;

use crate::reflect::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo};

/// Indexed view over one class's reflection metadata
#[derive(Debug)]
pub struct ClassIndex {
	info: Arc<ClassInfo>,
	// method name -> indices into info.methods, declaration order
	by_name: HashMap<String, Vec<usize>>,
}

impl ClassIndex {
	pub(crate) fn new(info: Arc<ClassInfo>) -> Self {
		let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
		for (i, method) in info.methods.iter().enumerate() {
			by_name.entry(method.name.clone()).or_default().push(i);
		}
		Self { info, by_name }
	}

	/// The indexed class's metadata
	#[must_use]
	pub fn info(&self) -> &ClassInfo {
		&self.info
	}

	/// Fully qualified name of the indexed class
	#[must_use]
	pub fn name(&self) -> &str {
		&self.info.name
	}

	/// Every declared method with the given name, in declaration order
	pub fn methods_named(&self, name: &str) -> impl Iterator<Item = &MethodInfo> {
		self.by_name
			.get(name)
			.map(Vec::as_slice)
			.unwrap_or_default()
			.iter()
			.map(|&i| &self.info.methods[i])
	}

	/// All declared methods, in declaration order
	#[must_use]
	pub fn methods(&self) -> &[MethodInfo] {
		&self.info.methods
	}

	/// All declared constructors, in declaration order
	#[must_use]
	pub fn constructors(&self) -> &[ConstructorInfo] {
		&self.info.constructors
	}

	/// All declared fields, in declaration order
	#[must_use]
	pub fn fields(&self) -> &[FieldInfo] {
		&self.info.fields
	}
}
