//! Session lifecycle: capability construction, the abstract remote end, and
//! the per-thread session registry.

// ============================================================================
// Submodules
// ============================================================================

/// Per-platform capability set construction.
pub mod capabilities;

/// Session lifecycle and the per-thread registry.
pub mod manager;

/// Abstract remote automation protocol traits.
pub mod remote;

// ============================================================================
// Re-exports
// ============================================================================

pub use capabilities::Capabilities;
pub use manager::{Session, SessionManager};
pub use remote::{RemoteEnd, RemoteHandle};
