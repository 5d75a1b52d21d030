//! Appium Pages - Synchronized page objects for mobile contacts-app tests.
//!
//! This library drives a contacts app on Android and iOS through an abstract
//! remote automation session, giving tests typed page objects whose
//! construction guarantees the screen is actually showing.
//!
//! # Architecture
//!
//! Four layers, each consuming only the one below:
//!
//! - **[`SessionManager`]**: opens the remote session, one per test thread
//! - **[`ElementResolver`]**: explicit waits, fallback chains, act/read
//! - **Pages**: [`MainListScreen`], [`AddFormScreen`], [`DetailScreen`]
//!   traits with one implementation per platform
//! - **[`PageFactory`]**: the only platform branch in the crate
//!
//! Key design principles:
//!
//! - A page object is attached, never constructed: popup sweep + load-wait
//!   first, so holding one proves the screen was present
//! - Probes degrade (`false`/`""`), write actions propagate errors
//! - Fallback locator chains try strict locators first and report every
//!   attempt on failure
//! - The screen graph is an explicit table ([`pages::transitions`])
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use appium_pages::{Config, Contact, PageFactory, Result, SessionManager};
//! # use appium_pages::RemoteEnd;
//!
//! # async fn example(remote: Arc<dyn RemoteEnd>) -> Result<()> {
//! let config = Config::android("com.android.contacts", ".activities.PeopleActivity");
//! let manager = SessionManager::new(remote);
//! let session = manager.create_session(&config).await?;
//! let factory = PageFactory::new(session, &config);
//!
//! let contact = Contact::new("Fábio Fernandes", "(11) 99999-9999");
//! let list = factory.main_list().await?;
//! let form = list.add_contact().await?;
//! form.fill(&contact).await?;
//! form.save().await?;
//!
//! // Save verifies no destination; re-attach the list explicitly.
//! let list = factory.main_list().await?;
//! assert!(list.contact_exists("Fábio Fernandes").await);
//!
//! manager.close_session().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | Session lifecycle and the abstract remote traits |
//! | [`resolver`] | Explicit-wait element resolution |
//! | [`pages`] | Page traits, platform implementations, transitions |
//! | [`factory`] | Platform dispatch |
//! | [`locator`] | Locator strategies and fallback chains |
//! | [`error`] | Error types and [`Result`] alias |

// ============================================================================
// Modules
// ============================================================================

/// Engine configuration: platform, app identifiers, timeouts.
pub mod config;

/// Contact value object passed into form operations.
pub mod contact;

/// Error types and [`Result`] alias.
pub mod error;

/// Platform dispatch: builds attached page objects.
pub mod factory;

/// Type-safe ID wrappers.
pub mod identifiers;

/// Locator strategies and ordered fallback chains.
pub mod locator;

/// Page traits, per-platform implementations, and the transition table.
pub mod pages;

/// Explicit-wait element resolution over one session.
pub mod resolver;

/// Session lifecycle and the abstract remote automation traits.
pub mod session;

#[cfg(test)]
pub(crate) mod testkit;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{Config, Platform};
pub use contact::{Contact, ContactBuilder};
pub use error::{Error, Result};
pub use factory::PageFactory;
pub use identifiers::{ElementId, SessionId};
pub use locator::{Locator, LocatorChain, xpath_literal};
pub use pages::{
    AddFormScreen, DetailScreen, Dismissal, MainListScreen, Op, PageState, Screen,
};
pub use resolver::ElementResolver;
pub use session::{Capabilities, RemoteEnd, RemoteHandle, Session, SessionManager};
