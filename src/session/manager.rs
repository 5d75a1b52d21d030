//! Session lifecycle and the per-thread session registry.
//!
//! Each test-execution thread owns at most one live [`Session`]. The
//! registry is keyed by [`ThreadId`] so parallel test threads never observe
//! each other's sessions; within a test, the session is passed explicitly
//! (usually as `Arc<Session>` captured by a resolver) rather than looked up
//! through globals.
//!
//! # Example
//!
//! ```ignore
//! let manager = SessionManager::new(remote_end);
//! let session = manager.create_session(&config).await?;
//!
//! // ... drive pages ...
//!
//! manager.close_session().await; // idempotent, never fails
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::config::{Config, Platform};
use crate::error::{Error, Result};
use crate::identifiers::SessionId;
use crate::session::capabilities::Capabilities;
use crate::session::remote::{RemoteEnd, RemoteHandle};

// ============================================================================
// Session
// ============================================================================

/// A live remote automation session bound to one test execution.
///
/// Immutable after creation apart from the closed flag. Closing is
/// idempotent; after close every remote access fails with
/// [`Error::NoActiveSession`].
pub struct Session {
    /// Local correlation ID.
    id: SessionId,

    /// Platform this session automates.
    platform: Platform,

    /// Capability set the session was opened with.
    capabilities: Capabilities,

    /// Implicit wait applied at the remote end.
    implicit_wait: Duration,

    /// The underlying remote handle.
    handle: Box<dyn RemoteHandle>,

    /// Set once by [`close`](Self::close).
    closed: AtomicBool,
}

impl Session {
    /// Creates a session wrapper around an opened remote handle.
    pub(crate) fn new(
        platform: Platform,
        capabilities: Capabilities,
        implicit_wait: Duration,
        handle: Box<dyn RemoteHandle>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            platform,
            capabilities,
            implicit_wait,
            handle,
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the session's local ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the session's platform.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the capability set the session was opened with.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the implicit wait applied at the remote end.
    #[inline]
    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        self.implicit_wait
    }

    /// Returns `true` once the session has been closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Returns the remote handle, or [`Error::NoActiveSession`] after close.
    pub(crate) fn remote(&self) -> Result<&dyn RemoteHandle> {
        if self.is_closed() {
            return Err(Error::NoActiveSession);
        }
        Ok(self.handle.as_ref())
    }

    /// Terminates the session on the remote end.
    ///
    /// Safe to call any number of times and safe to call even if creation
    /// only partially succeeded; remote failures during close are logged,
    /// never raised.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!(session_id = %self.id, "Session already closed");
            return;
        }
        match self.handle.close().await {
            Ok(()) => info!(session_id = %self.id, platform = %self.platform, "Session closed"),
            Err(e) => warn!(session_id = %self.id, error = %e, "Error closing remote session"),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("platform", &self.platform)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SessionManager
// ============================================================================

/// Owns one remote automation session per execution thread.
///
/// The manager is the only component holding shared mutable state; locators,
/// page states, and contacts are immutable or thread-confined by
/// construction, so no other locking exists in the engine.
pub struct SessionManager {
    /// The remote end sessions are opened against.
    remote: Arc<dyn RemoteEnd>,

    /// Live sessions keyed by owning thread.
    sessions: Mutex<FxHashMap<ThreadId, Arc<Session>>>,
}

impl SessionManager {
    /// Creates a manager for the given remote end.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteEnd>) -> Self {
        Self {
            remote,
            sessions: Mutex::new(FxHashMap::default()),
        }
    }

    /// Opens a session for the calling thread.
    ///
    /// Builds the platform capability set, opens the remote session, applies
    /// the implicit wait, and binds the session to the current thread. If
    /// the thread already owned a session it is closed first; at most one
    /// session is live per thread.
    ///
    /// # Errors
    ///
    /// [`Error::SessionCreationFailed`] wrapping the transport failure.
    pub async fn create_session(&self, config: &Config) -> Result<Arc<Session>> {
        let thread_id = thread::current().id();
        let platform = config.platform;
        let capabilities = Capabilities::for_platform(config);

        info!(%platform, ?capabilities, "Creating session");

        let handle = self
            .remote
            .open(&capabilities)
            .await
            .map_err(|e| Error::session_creation_failed(platform, e))?;

        if let Err(e) = handle.set_implicit_wait(config.implicit_wait()).await {
            // The half-open session must not leak.
            if let Err(close_err) = handle.close().await {
                warn!(error = %close_err, "Error closing half-open session");
            }
            return Err(Error::session_creation_failed(platform, e));
        }

        let session = Arc::new(Session::new(
            platform,
            capabilities,
            config.implicit_wait(),
            handle,
        ));

        let previous = self
            .sessions
            .lock()
            .insert(thread_id, Arc::clone(&session));
        if let Some(previous) = previous {
            warn!(session_id = %previous.id(), "Replacing live session for this thread");
            previous.close().await;
        }

        info!(session_id = %session.id(), %platform, "Session created");
        Ok(session)
    }

    /// Returns the calling thread's active session.
    ///
    /// # Errors
    ///
    /// [`Error::NoActiveSession`] if the thread has none.
    pub fn current_session(&self) -> Result<Arc<Session>> {
        let thread_id = thread::current().id();
        self.sessions
            .lock()
            .get(&thread_id)
            .cloned()
            .ok_or(Error::NoActiveSession)
    }

    /// Closes and unbinds the calling thread's session, if any.
    ///
    /// Idempotent: a missing session is a no-op, and closing twice never
    /// raises. Always safe to call on every exit path of a test.
    pub async fn close_session(&self) {
        let thread_id = thread::current().id();
        let session = self.sessions.lock().remove(&thread_id);
        match session {
            Some(session) => session.close().await,
            None => debug!("No session bound to this thread; nothing to close"),
        }
    }

    /// Returns `true` if the calling thread has an active session.
    #[must_use]
    pub fn has_active_session(&self) -> bool {
        let thread_id = thread::current().id();
        self.sessions.lock().contains_key(&thread_id)
    }

    /// Returns the number of live sessions across all threads.
    #[inline]
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_count", &self.session_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
