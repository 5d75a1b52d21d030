//! Abstract remote automation protocol.
//!
//! The engine never speaks a wire protocol itself; it consumes the remote
//! end as this minimal capability set:
//!
//! - open(capabilities) -> handle
//! - find(handle, locator) -> element references (possibly empty)
//! - act(element, verb, payload) -> result
//! - close(handle)
//!
//! An Appium HTTP client, a vendor cloud grid, or the in-crate test fake all
//! plug in behind these two traits.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::identifiers::ElementId;
use crate::locator::Locator;
use crate::session::Capabilities;

// ============================================================================
// RemoteEnd
// ============================================================================

/// Opens remote automation sessions.
///
/// One remote end is shared by every [`crate::SessionManager`]; each `open`
/// yields an independent session handle.
#[async_trait]
pub trait RemoteEnd: Send + Sync {
    /// Opens a session with the given capability set.
    ///
    /// # Errors
    ///
    /// Returns the transport-level failure; the session manager wraps it in
    /// [`crate::Error::SessionCreationFailed`].
    async fn open(&self, capabilities: &Capabilities) -> Result<Box<dyn RemoteHandle>>;
}

// ============================================================================
// RemoteHandle
// ============================================================================

/// A live remote automation session.
///
/// Element references returned by [`find`](Self::find) are owned by the
/// remote end and may go stale whenever the app re-renders; the resolver
/// re-finds before every action instead of caching them.
#[async_trait]
pub trait RemoteHandle: Send + Sync {
    /// Finds all elements matching the locator.
    ///
    /// An empty result is a normal outcome, not an error.
    async fn find(&self, locator: &Locator) -> Result<Vec<ElementId>>;

    /// Clicks an element.
    async fn click(&self, element: &ElementId) -> Result<()>;

    /// Clears an input element.
    async fn clear(&self, element: &ElementId) -> Result<()>;

    /// Types text into an input element.
    async fn send_keys(&self, element: &ElementId, text: &str) -> Result<()>;

    /// Reads an element's visible text.
    async fn text(&self, element: &ElementId) -> Result<String>;

    /// Returns whether an element currently accepts interaction.
    async fn is_enabled(&self, element: &ElementId) -> Result<bool>;

    /// Sets the session-level implicit find timeout.
    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()>;

    /// Terminates the session on the remote end.
    ///
    /// Called at most once per handle; [`crate::Session`] guards repeat
    /// closes.
    async fn close(&self) -> Result<()>;
}
