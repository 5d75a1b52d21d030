//! Page objects: typed views over the contacts app's screens.
//!
//! Each screen is a trait ([`MainListScreen`], [`AddFormScreen`],
//! [`DetailScreen`]) with one implementation per platform; code written
//! against the traits never branches on platform. Implementations are
//! attached, not constructed: attaching dismisses any system popup in the
//! way, then blocks until the screen's identifying element is present, so a
//! page object in hand always refers to a screen that was actually showing.
//!
//! # Navigation
//!
//! Methods that leave the current screen return the next page already
//! attached. The two exceptions are [`AddFormScreen::save`] and
//! [`AddFormScreen::cancel`], which verify nothing; callers re-attach the
//! list through [`crate::PageFactory`] (see [`transitions`]).

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::resolver::ElementResolver;

pub mod android;
pub mod ios;
pub mod transitions;

pub use transitions::{Op, Screen};

// ============================================================================
// Page traits
// ============================================================================

/// Behavior common to every attached page.
#[async_trait]
pub trait PageState: Send + Sync + std::fmt::Debug {
    /// The screen this page represents.
    fn screen(&self) -> Screen;

    /// Probes whether the screen still shows its identifying elements.
    ///
    /// A probe: absence and remote failures read as `false`, never as an
    /// error.
    async fn is_current_page(&self) -> bool;

    /// Reads the screen's title text, degrading to `""`.
    async fn title(&self) -> String;
}

/// The contact list.
#[async_trait]
pub trait MainListScreen: PageState {
    /// Opens the add-contact form.
    async fn add_contact(&self) -> Result<Box<dyn AddFormScreen>>;

    /// Opens the detail view of the named contact.
    ///
    /// Resolution runs through a fallback chain from strictest locator to
    /// loosest; [`Error::ElementNotFound`] lists every attempt.
    async fn select_contact(&self, name: &str) -> Result<Box<dyn DetailScreen>>;

    /// Probes whether a contact with this name is visible in the list.
    async fn contact_exists(&self, name: &str) -> bool;

    /// Probes whether the list shows any contact at all.
    async fn has_contacts(&self) -> bool;

    /// Counts the visible contact rows, degrading to 0.
    async fn contact_count(&self) -> usize;

    /// Types `query` into the list's search affordance.
    ///
    /// A no-op (logged) when the list is empty or the search affordance is
    /// missing, matching how the app hides search on an empty list.
    async fn search(&self, query: &str) -> Result<()>;
}

/// The new-contact form.
#[async_trait]
pub trait AddFormScreen: PageState {
    /// Fills the form from `contact`.
    ///
    /// The display name is split into the form's first/last fields; email
    /// and company are typed only when non-empty and the platform form has
    /// the field.
    async fn fill(&self, contact: &Contact) -> Result<()>;

    /// Commits the form. Verifies no destination; re-attach the list via
    /// the factory.
    async fn save(&self) -> Result<()>;

    /// Discards the form. Verifies no destination; re-attach the list via
    /// the factory.
    async fn cancel(&self) -> Result<()>;
}

/// A single contact's detail view.
#[async_trait]
pub trait DetailScreen: PageState {
    /// Deletes the contact through the overflow menu and confirm dialog,
    /// returning the re-attached list.
    async fn delete(&self) -> Result<Box<dyn MainListScreen>>;

    /// Opens the delete confirm dialog, then backs out of it. The detail
    /// view stays current.
    async fn cancel_delete(&self) -> Result<()>;

    /// Reads the displayed contact fields, each degrading to `""`.
    async fn contact_details(&self) -> Contact;

    /// Navigates up to the re-attached list.
    async fn back(&self) -> Result<Box<dyn MainListScreen>>;
}

// ============================================================================
// Popup dismissal
// ============================================================================

/// Outcome of a best-effort popup sweep.
///
/// Dismissal never fails page attachment; a popup that refuses to go away
/// is recorded here and surfaces later as the load-wait timing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// At least one popup was present and dismissed.
    Dismissed,
    /// No popup was showing.
    NotPresent,
    /// A popup was present but dismissing it failed.
    Ignored,
}

impl Dismissal {
    /// Returns `true` if a popup was present and went away.
    #[inline]
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        matches!(self, Self::Dismissed)
    }
}

/// A system popup the platform may show over the app.
pub(crate) struct Popup {
    /// Label for logs.
    pub(crate) name: &'static str,
    /// Element whose presence means the popup is showing.
    pub(crate) probe: Locator,
    /// Element that closes it.
    pub(crate) dismiss: Locator,
}

/// Sweeps the platform's known popups, best effort.
pub(crate) async fn dismiss_popups(resolver: &ElementResolver, popups: &[Popup]) -> Dismissal {
    let mut outcome = Dismissal::NotPresent;
    for popup in popups {
        if !resolver.is_present(&popup.probe).await {
            continue;
        }
        match resolver.click(&popup.dismiss).await {
            Ok(()) => {
                info!(popup = popup.name, "Dismissed popup");
                if outcome != Dismissal::Ignored {
                    outcome = Dismissal::Dismissed;
                }
            }
            Err(e) => {
                warn!(popup = popup.name, error = %e, "Popup would not dismiss; ignoring");
                outcome = Dismissal::Ignored;
            }
        }
    }
    outcome
}

// ============================================================================
// Attachment helpers
// ============================================================================

/// Blocks until the screen's identifying element appears.
///
/// # Errors
///
/// [`Error::PageLoadTimeout`] naming the screen and the budget.
pub(crate) async fn wait_for_page_load(
    resolver: &ElementResolver,
    screen: Screen,
    identifying: &Locator,
) -> Result<()> {
    let timeout = resolver.page_load_timeout();
    if resolver.wait_present(identifying, timeout).await {
        info!(%screen, "Page loaded");
        Ok(())
    } else {
        Err(Error::page_load_timeout(screen, timeout))
    }
}

/// OR-set probe: any one of `locators` present.
pub(crate) async fn any_present(resolver: &ElementResolver, locators: &[Locator]) -> bool {
    for locator in locators {
        if resolver.is_present(locator).await {
            return true;
        }
    }
    false
}

/// Logs the table-declared destination before a navigation runs.
pub(crate) fn log_navigation(from: Screen, op: Op) {
    match transitions::transition(from, op) {
        Some(Some(to)) => debug!(%from, %op, %to, "Navigating"),
        Some(None) => debug!(%from, %op, "Leaving screen; destination unverified"),
        None => warn!(%from, %op, "Operation missing from transition table"),
    }
}

// ============================================================================
// Tests
// ============================================================================
