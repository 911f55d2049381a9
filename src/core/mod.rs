//! Interception core
//!
//! Resolution of loose member descriptions into concrete handles, the
//! process-wide hook registry with its single multiplexing dispatch entry
//! point, and the load-session state every other component reads.

mod bundle;
mod index;
mod registry;
mod resolver;
pub mod session;

pub use bundle::{AfterCallback, BeforeCallback, HookBundle};
pub use index::ClassIndex;
pub use registry::{DispatchStats, HookRegistry};
pub use resolver::Resolver;
pub use session::LoadSession;
