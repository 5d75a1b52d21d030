//! Error types for the page automation engine.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use appium_pages::{Result, PageFactory};
//!
//! async fn example(factory: &PageFactory) -> Result<()> {
//!     let main = factory.main_list().await?;
//!     let form = main.add_contact().await?;
//!     form.save().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::UnsupportedPlatform`], [`Error::InvalidArgument`] |
//! | Session | [`Error::NoActiveSession`], [`Error::SessionCreationFailed`] |
//! | Pages | [`Error::PageLoadTimeout`] |
//! | Elements | [`Error::ElementActionFailed`], [`Error::ElementNotFound`] |
//! | Waits | [`Error::Timeout`] |
//! | External | [`Error::Remote`], [`Error::Json`] |
//!
//! Probing operations (`is_present`, `read_text`, popup dismissal) never
//! surface these errors; they encode absence as `false`/empty instead. Write
//! actions and page construction always propagate.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;
use std::time::Duration;

use thiserror::Error;

use crate::config::Platform;
use crate::locator::Locator;
use crate::pages::transitions::Screen;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant carries enough context to triage a failed test without
/// re-running it: the locator, screen name, and timeout involved.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Platform selector is not one of the supported values.
    ///
    /// Only `android` and `ios` are recognized.
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform {
        /// The rejected platform string.
        platform: String,
    },

    /// Invalid argument (for example an unknown screen name).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// A session-dependent operation ran before a session was created,
    /// or after it was closed.
    ///
    /// This is an ordering error in the caller, not a flaky condition.
    #[error("No active session for this thread; call create_session() first")]
    NoActiveSession,

    /// Opening the remote session failed.
    ///
    /// Wraps the underlying transport error.
    #[error("Failed to create {platform} session")]
    SessionCreationFailed {
        /// Platform the session was being created for.
        platform: Platform,
        /// The transport failure.
        #[source]
        source: Box<Error>,
    },

    // ========================================================================
    // Page Errors
    // ========================================================================
    /// A page's identifying element never appeared within its load budget.
    ///
    /// Fatal to the current test; a page object is never handed to a caller
    /// in an unverified state.
    #[error("Page did not load: {screen} (waited {timeout_ms}ms)")]
    PageLoadTimeout {
        /// The screen that failed to load.
        screen: Screen,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// A required write action (click/type/clear) could not complete.
    #[error("{action} failed on {locator}")]
    ElementActionFailed {
        /// The action that failed.
        action: &'static str,
        /// Locator the action targeted.
        locator: String,
        /// The wait expiry or remote failure underneath.
        #[source]
        source: Box<Error>,
    },

    /// Every locator in a fallback chain failed to resolve.
    #[error("Element not found: {element} (tried {})", .attempted.join(", "))]
    ElementNotFound {
        /// Logical name of the element being resolved.
        element: String,
        /// Every locator attempted, in order.
        attempted: Vec<String>,
    },

    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// An explicit wait expired.
    ///
    /// Usually appears as the source of an [`Error::ElementActionFailed`].
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the condition waited for.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Failure reported by the remote automation session.
    #[error("Remote session error: {message}")]
    Remote {
        /// Description from the remote end.
        message: String,
    },

    /// JSON serialization error (capability values).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unsupported platform error.
    #[inline]
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a session creation error wrapping the transport failure.
    #[inline]
    pub fn session_creation_failed(platform: Platform, source: Error) -> Self {
        Self::SessionCreationFailed {
            platform,
            source: Box::new(source),
        }
    }

    /// Creates a page load timeout error.
    #[inline]
    pub fn page_load_timeout(screen: Screen, timeout: Duration) -> Self {
        Self::PageLoadTimeout {
            screen,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Creates an element action failure carrying the locator and cause.
    #[inline]
    pub fn element_action_failed(action: &'static str, locator: &Locator, source: Error) -> Self {
        Self::ElementActionFailed {
            action,
            locator: locator.to_string(),
            source: Box::new(source),
        }
    }

    /// Creates an element not found error naming every attempted locator.
    #[inline]
    pub fn element_not_found(element: impl Into<String>, attempted: &[Locator]) -> Self {
        Self::ElementNotFound {
            element: element.into(),
            attempted: attempted.iter().map(ToString::to_string).collect(),
        }
    }

    /// Creates a wait timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Creates a remote session error.
    #[inline]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error is a wait or page-load expiry.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::PageLoadTimeout { .. })
    }

    /// Returns `true` if this is an element resolution or action error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementActionFailed { .. } | Self::ElementNotFound { .. }
        )
    }

    /// Returns `true` if this is a session lifecycle error.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Self::NoActiveSession | Self::SessionCreationFailed { .. }
        )
    }

    /// Returns `true` if this error indicates broken configuration rather
    /// than a runtime condition.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. } | Self::InvalidArgument { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
