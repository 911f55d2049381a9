//! Model of the target's reflectable type system
//!
//! The core never touches the target runtime directly; it works against
//! the metadata in this module, which the host runtime supplies per class.

mod class;
mod descriptor;

pub use class::{ClassInfo, ConstructorInfo, FieldInfo, LoaderId, MethodInfo};
pub use descriptor::{FieldHandle, MemberDescriptor, MemberKind, MemberTarget, ParamSpec, ResolvedHandle};
