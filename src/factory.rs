//! Platform dispatch: the one place that branches on Android vs iOS.
//!
//! Everything downstream of the factory works through the traits in
//! [`crate::pages`]; a test written against `Box<dyn MainListScreen>` runs
//! unchanged on both platforms.
//!
//! # Example
//!
//! ```ignore
//! let factory = PageFactory::new(session, &config);
//! let list = factory.main_list().await?;
//! let form = list.add_contact().await?;
//! form.fill(&contact).await?;
//! form.save().await?;
//! let list = factory.main_list().await?;
//! assert!(list.contact_exists(&contact.name).await);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, Platform};
use crate::error::Result;
use crate::pages::android::{AndroidAddForm, AndroidDetail, AndroidMainList};
use crate::pages::ios::{IosAddForm, IosDetail, IosMainList};
use crate::pages::{AddFormScreen, DetailScreen, MainListScreen, PageState, Screen};
use crate::resolver::ElementResolver;
use crate::session::Session;

// ============================================================================
// PageFactory
// ============================================================================

/// Builds attached page objects for the session's platform.
pub struct PageFactory {
    resolver: ElementResolver,
}

impl PageFactory {
    /// Creates a factory over `session` with the configured timeouts.
    #[must_use]
    pub fn new(session: Arc<Session>, config: &Config) -> Self {
        Self {
            resolver: ElementResolver::new(session, config),
        }
    }

    /// The platform pages will be built for.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.resolver.session().platform()
    }

    /// Attaches to the contact list.
    ///
    /// # Errors
    ///
    /// [`crate::Error::PageLoadTimeout`] when the list is not the screen
    /// actually showing.
    pub async fn main_list(&self) -> Result<Box<dyn MainListScreen>> {
        debug!(platform = %self.platform(), screen = %Screen::MainList, "Attaching page");
        match self.platform() {
            Platform::Android => {
                let page = AndroidMainList::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
            Platform::Ios => {
                let page = IosMainList::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
        }
    }

    /// Attaches to the new-contact form.
    ///
    /// # Errors
    ///
    /// Same contract as [`main_list`](Self::main_list).
    pub async fn add_form(&self) -> Result<Box<dyn AddFormScreen>> {
        debug!(platform = %self.platform(), screen = %Screen::AddForm, "Attaching page");
        match self.platform() {
            Platform::Android => {
                let page = AndroidAddForm::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
            Platform::Ios => {
                let page = IosAddForm::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
        }
    }

    /// Attaches to a contact's detail view.
    ///
    /// # Errors
    ///
    /// Same contract as [`main_list`](Self::main_list).
    pub async fn detail(&self) -> Result<Box<dyn DetailScreen>> {
        debug!(platform = %self.platform(), screen = %Screen::Detail, "Attaching page");
        match self.platform() {
            Platform::Android => {
                let page = AndroidDetail::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
            Platform::Ios => {
                let page = IosDetail::attach(self.resolver.clone()).await?;
                Ok(Box::new(page))
            }
        }
    }

    /// Attaches to `screen` behind the screen-agnostic trait, for callers
    /// that drive pages generically.
    ///
    /// # Errors
    ///
    /// Same contract as [`main_list`](Self::main_list).
    pub async fn create_page(&self, screen: Screen) -> Result<Box<dyn PageState>> {
        match (self.platform(), screen) {
            (Platform::Android, Screen::MainList) => {
                Ok(Box::new(AndroidMainList::attach(self.resolver.clone()).await?))
            }
            (Platform::Android, Screen::AddForm) => {
                Ok(Box::new(AndroidAddForm::attach(self.resolver.clone()).await?))
            }
            (Platform::Android, Screen::Detail) => {
                Ok(Box::new(AndroidDetail::attach(self.resolver.clone()).await?))
            }
            (Platform::Ios, Screen::MainList) => {
                Ok(Box::new(IosMainList::attach(self.resolver.clone()).await?))
            }
            (Platform::Ios, Screen::AddForm) => {
                Ok(Box::new(IosAddForm::attach(self.resolver.clone()).await?))
            }
            (Platform::Ios, Screen::Detail) => {
                Ok(Box::new(IosDetail::attach(self.resolver.clone()).await?))
            }
        }
    }
}

impl std::fmt::Debug for PageFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFactory")
            .field("platform", &self.platform())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
