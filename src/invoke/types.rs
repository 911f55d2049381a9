//! Value types at the host-runtime boundary
//!
//! Arguments, receivers and results of intercepted calls cross the
//! boundary as `Value`s; a failure raised inside the target crosses as a
//! `Thrown`. Neither side interprets object payloads: an object is an
//! opaque reference plus its class name.

/// A dynamically typed value crossing the interception boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// The null reference
	Null,
	/// A boolean
	Bool(bool),
	/// Any integral primitive, widened
	Int(i64),
	/// Any floating-point primitive, widened
	Float(f64),
	/// A string
	Str(String),
	/// An opaque object reference: class name plus runtime identity
	Object {
		/// Fully qualified class name of the referent
		class_name: String,
		/// Host-runtime identity of the referent
		id: u64,
	},
}

impl Value {
	/// The value's class name as the target runtime would report it
	#[must_use]
	pub fn class_name(&self) -> &str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Int(_) => "long",
			Self::Float(_) => "double",
			Self::Str(_) => "java.lang.String",
			Self::Object { class_name, .. } => class_name,
		}
	}

	/// Read the value as an integer, if it is one
	#[must_use]
	pub const fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Read the value as a string slice, if it is one
	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}
}

/// A failure raised inside the target process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown {
	/// Fully qualified class name of the failure
	pub class_name: String,
	/// Human-readable failure message
	pub message: String,
}

impl Thrown {
	/// Create a failure record
	#[must_use]
	pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			class_name: class_name.into(),
			message: message.into(),
		}
	}
}

impl std::fmt::Display for Thrown {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.class_name, self.message)
	}
}

/// Outcome of one real call, as returned to the host runtime
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
	/// The call returned normally with this value
	Return(Value),
	/// The call raised this failure
	Thrown(Thrown),
}

impl CallOutcome {
	/// The returned value, if the call returned normally
	#[must_use]
	pub const fn returned(&self) -> Option<&Value> {
		match self {
			Self::Return(v) => Some(v),
			Self::Thrown(_) => None,
		}
	}
}
