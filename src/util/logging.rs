//! Logging utilities for hookpoint
//!
//! This module provides logging functionality for hookpoint.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize logging once
static INIT: Once = Once::new();

/// Initialize the tracing system
///
/// This function sets up tracing with an `EnvFilter` that:
/// - Honors the `RUST_LOG` environment variable if set
/// - Uses the `HOOKPOINT_DEBUG` environment variable to control logging level
/// - Only logs warnings and errors by default
pub fn init_logging() {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_default_env()
			.or_else(|_| {
				if std::env::var("HOOKPOINT_DEBUG").is_ok() {
					Ok::<EnvFilter, Box<dyn std::error::Error>>(EnvFilter::new("hookpoint=debug"))
				} else {
					Ok::<EnvFilter, Box<dyn std::error::Error>>(EnvFilter::new("hookpoint=warn"))
				}
			})
			.unwrap();

		// A host harness may already own the global subscriber.
		let _ = tracing_subscriber::registry().with(fmt::layer().with_target(true)).with(filter).try_init();
	});
}
