//! Types for working with intercepted calls
//!
//! This module contains the types used to represent argument and result
//! values at the host-runtime boundary, and the per-call context threaded
//! through the before/after callback chain.

mod context;
mod types;

pub use context::InvocationContext;
pub use types::{CallOutcome, Thrown, Value};
