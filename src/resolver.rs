//! Explicit-wait element resolution.
//!
//! [`ElementResolver`] is the single place where waiting happens: every page
//! operation goes through it, so pages themselves stay free of timing logic.
//! The resolver polls the remote end at a fixed interval until the element
//! condition holds or the deadline passes.
//!
//! Two kinds of calls with different failure behavior:
//!
//! | Kind    | Calls                                      | On failure          |
//! |---------|--------------------------------------------|---------------------|
//! | Probes  | `is_present`, `read_text`, `count`         | degrade, never fail |
//! | Actions | `click`, `type_text`, `clear`, `first_present` | propagate errors |

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::locator::{Locator, LocatorChain};
use crate::session::Session;

/// Interval between polls of the remote end.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// ElementResolver
// ============================================================================

/// Waits for, acts on, and reads elements through one session.
///
/// Holds its session explicitly; cloning is cheap and every clone addresses
/// the same remote session.
#[derive(Clone)]
pub struct ElementResolver {
    /// The session all calls go through.
    session: Arc<Session>,

    /// Deadline for actions (`click`, `type_text`, `clear`).
    explicit_wait: Duration,

    /// Deadline for presence probes and per-locator fallback attempts.
    probe_timeout: Duration,

    /// Deadline for page-identifying elements after navigation.
    page_load_timeout: Duration,
}

impl ElementResolver {
    /// Creates a resolver over `session` with the configured timeouts.
    #[must_use]
    pub fn new(session: Arc<Session>, config: &Config) -> Self {
        Self {
            session,
            explicit_wait: config.explicit_wait(),
            probe_timeout: config.probe_timeout(),
            page_load_timeout: config.page_load_timeout(),
        }
    }

    /// Returns the session this resolver addresses.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Returns the deadline used for page-identifying elements.
    #[inline]
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        self.page_load_timeout
    }

    // ------------------------------------------------------------------------
    // Presence
    // ------------------------------------------------------------------------

    /// Polls until `locator` matches at least one element or `timeout`
    /// passes.
    ///
    /// Never fails: remote errors and a closed session read as "not
    /// present". Returns within `timeout` plus one poll interval.
    pub async fn wait_present(&self, locator: &Locator, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.probe(locator).await {
                return true;
            }
            if Instant::now() >= deadline {
                debug!(%locator, timeout_ms = timeout.as_millis() as u64, "Element did not appear");
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Presence probe with the configured probe timeout (default 2 s).
    pub async fn is_present(&self, locator: &Locator) -> bool {
        self.wait_present(locator, self.probe_timeout).await
    }

    /// Presence probe with an explicit timeout.
    pub async fn is_present_for(&self, locator: &Locator, timeout: Duration) -> bool {
        self.wait_present(locator, timeout).await
    }

    /// Single non-waiting presence check.
    async fn probe(&self, locator: &Locator) -> bool {
        match self.session.remote() {
            Ok(remote) => match remote.find(locator).await {
                Ok(ids) => !ids.is_empty(),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Waits for `locator` to be clickable (present and enabled), then
    /// clicks it.
    ///
    /// # Errors
    ///
    /// [`Error::ElementActionFailed`] with the wait expiry or remote failure
    /// as cause; [`Error::NoActiveSession`] on a closed session.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let id = self
            .wait_for(locator, true)
            .await
            .map_err(|e| wrap_action("click", locator, e))?;
        let remote = self.session.remote()?;
        remote
            .click(&id)
            .await
            .map_err(|e| wrap_action("click", locator, e))?;
        debug!(%locator, "Clicked element");
        Ok(())
    }

    /// Waits for `locator`, clears the field, and types `text` into it.
    ///
    /// # Errors
    ///
    /// Same contract as [`click`](Self::click).
    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        let id = self
            .wait_for(locator, false)
            .await
            .map_err(|e| wrap_action("type_text", locator, e))?;
        let remote = self.session.remote()?;
        remote
            .clear(&id)
            .await
            .map_err(|e| wrap_action("type_text", locator, e))?;
        remote
            .send_keys(&id, text)
            .await
            .map_err(|e| wrap_action("type_text", locator, e))?;
        debug!(%locator, chars = text.chars().count(), "Typed text");
        Ok(())
    }

    /// Waits for `locator` and clears the field.
    ///
    /// # Errors
    ///
    /// Same contract as [`click`](Self::click).
    pub async fn clear(&self, locator: &Locator) -> Result<()> {
        let id = self
            .wait_for(locator, false)
            .await
            .map_err(|e| wrap_action("clear", locator, e))?;
        let remote = self.session.remote()?;
        remote
            .clear(&id)
            .await
            .map_err(|e| wrap_action("clear", locator, e))?;
        Ok(())
    }

    /// Polls until the locator matches and, when `require_enabled`, the
    /// first match reports enabled.
    async fn wait_for(&self, locator: &Locator, require_enabled: bool) -> Result<ElementId> {
        let deadline = Instant::now() + self.explicit_wait;
        loop {
            let remote = self.session.remote()?;
            if let Some(id) = remote
                .find(locator)
                .await
                .ok()
                .and_then(|ids| ids.into_iter().next())
            {
                let ready = if require_enabled {
                    remote.is_enabled(&id).await.unwrap_or(false)
                } else {
                    true
                };
                if ready {
                    return Ok(id);
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::timeout("wait for element", self.explicit_wait));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Reads the visible text of the first match, degrading to `""`.
    ///
    /// A missing element or a remote failure is logged and read as empty,
    /// never raised.
    pub async fn read_text(&self, locator: &Locator) -> String {
        let Ok(remote) = self.session.remote() else {
            return String::new();
        };
        let id = {
            let deadline = Instant::now() + self.probe_timeout;
            loop {
                match remote.find(locator).await {
                    Ok(ids) if !ids.is_empty() => break ids.into_iter().next(),
                    _ if Instant::now() >= deadline => break None,
                    _ => tokio::time::sleep(POLL_INTERVAL).await,
                }
            }
        };
        match id {
            Some(id) => match remote.text(&id).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(%locator, error = %e, "Text read failed; treating as empty");
                    String::new()
                }
            },
            None => {
                warn!(%locator, "Element absent for text read; treating as empty");
                String::new()
            }
        }
    }

    /// Counts current matches for `locator`, degrading to 0.
    pub async fn count(&self, locator: &Locator) -> usize {
        match self.session.remote() {
            Ok(remote) => remote.find(locator).await.map(|ids| ids.len()).unwrap_or(0),
            Err(_) => 0,
        }
    }

    // ------------------------------------------------------------------------
    // Fallback chains
    // ------------------------------------------------------------------------

    /// Resolves a fallback chain to the first locator that matches.
    ///
    /// Locators are probed strictly in chain order, each with the probe
    /// timeout; the first match wins and later strategies are not tried.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`] listing every attempted locator when the
    /// whole chain misses; [`Error::NoActiveSession`] on a closed session.
    pub async fn first_present(&self, chain: &LocatorChain) -> Result<Locator> {
        self.session.remote()?;
        for locator in chain.locators() {
            if self.wait_present(locator, self.probe_timeout).await {
                debug!(element = chain.element(), %locator, "Fallback locator matched");
                return Ok(locator.clone());
            }
            debug!(element = chain.element(), %locator, "Fallback locator missed, trying next");
        }
        Err(Error::element_not_found(chain.element(), chain.locators()))
    }
}

impl std::fmt::Debug for ElementResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementResolver")
            .field("session_id", &self.session.id())
            .field("explicit_wait", &self.explicit_wait)
            .field("probe_timeout", &self.probe_timeout)
            .finish()
    }
}

/// Keeps session loss distinct from action failure.
fn wrap_action(action: &'static str, locator: &Locator, cause: Error) -> Error {
    match cause {
        Error::NoActiveSession => Error::NoActiveSession,
        other => Error::element_action_failed(action, locator, other),
    }
}

// ============================================================================
// Tests
// ============================================================================
