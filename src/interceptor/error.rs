//! Error types for the interceptor
//!
//! This module contains error types and a result type for the interceptor.

use thiserror::Error;

/// Result type for interceptor operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Error type for interceptor operations
#[derive(Debug, Error)]
pub enum HookError {
	/// A class name could not be resolved via the supplied classloader
	#[error("class `{0}` could not be resolved by the supplied classloader")]
	ClassResolution(String),

	/// An exact-match member lookup found no declared member
	#[error("no member `{member}` with the requested signature is declared on `{class}`")]
	NotFound {
		/// The owning class that was searched
		class: String,
		/// The requested member name (`<init>` for constructors)
		member: String,
	},

	/// The host runtime refused or failed to install the low-level intercept
	#[error("failed to install intercept for `{handle}`: {reason}")]
	Install {
		/// Display form of the handle the install was attempted for
		handle: String,
		/// The host runtime's failure description
		reason: String,
	},

	/// A before/after callback raised during dispatch
	///
	/// Never surfaced as a dispatch outcome; used by callbacks to signal a
	/// failure that the registry logs and isolates.
	#[error("callback failed: {0}")]
	Callback(String),

	/// No load session is active; attach has not happened yet
	#[error("no load session is active (attach has not happened)")]
	NoSession,

	/// An argument slot index was out of range for the call's arity
	#[error("argument index {index} out of range for {arity}-argument call")]
	ArgIndex {
		/// The requested slot
		index: usize,
		/// The call's argument count
		arity: usize,
	},

	/// Other error
	#[error("{0}")]
	Other(String),
}

impl From<&str> for HookError {
	fn from(s: &str) -> Self {
		Self::Other(s.to_string())
	}
}

impl From<String> for HookError {
	fn from(s: String) -> Self {
		Self::Other(s)
	}
}
