//! Utility modules for hookpoint
//!
//! This module contains utility functions and types used by hookpoint.

pub mod logging;

// Re-export all utility functions
pub use logging::init_logging;
