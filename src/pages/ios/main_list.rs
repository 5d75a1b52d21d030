//! The iOS contact list.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::locator::{Locator, LocatorChain, xpath_literal};
use crate::pages::ios::{IosAddForm, IosDetail, popups};
use crate::pages::{
    AddFormScreen, DetailScreen, MainListScreen, Op, PageState, Screen, any_present,
    dismiss_popups, log_navigation, wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// IosMainList
// ============================================================================

/// The Contacts list under its navigation bar.
#[derive(Debug)]
pub struct IosMainList {
    resolver: ElementResolver,
}

impl IosMainList {
    fn add_button() -> Locator {
        Locator::accessibility_id("Add")
    }

    fn navigation_bar() -> Locator {
        Locator::xpath("//XCUIElementTypeNavigationBar[@name='Contacts']")
    }

    fn search_field() -> Locator {
        Locator::xpath("//XCUIElementTypeSearchField[@name='Search']")
    }

    fn cells() -> Locator {
        Locator::xpath("//XCUIElementTypeCell")
    }

    /// Fallback chain for one contact row: the cell by name, then the name
    /// as a static text value, then as a static text name.
    fn row_chain(name: &str) -> LocatorChain {
        let literal = xpath_literal(name);
        LocatorChain::new(format!("contact row {name:?}"))
            .or(Locator::xpath(format!(
                "//XCUIElementTypeCell[contains(@name, {literal})]"
            )))
            .or(Locator::xpath(format!(
                "//XCUIElementTypeStaticText[contains(@value, {literal})]"
            )))
            .or(Locator::xpath(format!(
                "//XCUIElementTypeStaticText[contains(@name, {literal})]"
            )))
    }

    /// Attaches to the list: alert sweep, then load-wait on the nav bar.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::MainList, &Self::navigation_bar()).await?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl PageState for IosMainList {
    fn screen(&self) -> Screen {
        Screen::MainList
    }

    async fn is_current_page(&self) -> bool {
        any_present(&self.resolver, &[Self::navigation_bar(), Self::add_button()]).await
    }

    async fn title(&self) -> String {
        self.resolver.read_text(&Self::navigation_bar()).await
    }
}

#[async_trait]
impl MainListScreen for IosMainList {
    async fn add_contact(&self) -> Result<Box<dyn AddFormScreen>> {
        log_navigation(Screen::MainList, Op::AddContact);
        self.resolver.click(&Self::add_button()).await?;
        let form = IosAddForm::attach(self.resolver.clone()).await?;
        Ok(Box::new(form))
    }

    async fn select_contact(&self, name: &str) -> Result<Box<dyn DetailScreen>> {
        log_navigation(Screen::MainList, Op::SelectContact);
        let locator = self.resolver.first_present(&Self::row_chain(name)).await?;
        self.resolver.click(&locator).await?;
        let detail = IosDetail::attach(self.resolver.clone()).await?;
        Ok(Box::new(detail))
    }

    async fn contact_exists(&self, name: &str) -> bool {
        self.resolver
            .first_present(&Self::row_chain(name))
            .await
            .is_ok()
    }

    async fn has_contacts(&self) -> bool {
        self.resolver.count(&Self::cells()).await > 0
    }

    async fn contact_count(&self) -> usize {
        self.resolver.count(&Self::cells()).await
    }

    async fn search(&self, query: &str) -> Result<()> {
        log_navigation(Screen::MainList, Op::Search);
        if !self.has_contacts().await {
            warn!("Contact list is empty; skipping search");
            return Ok(());
        }
        let field = Self::search_field();
        if !self.resolver.is_present(&field).await {
            warn!("Search field not found; skipping search");
            return Ok(());
        }
        self.resolver.click(&field).await?;
        self.resolver.type_text(&field, query).await?;
        debug!(query, "Searched contact list");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::config::Config;
    use crate::session::SessionManager;
    use crate::testkit::FakeRemoteEnd;

    async fn attach_with(fake: Arc<FakeRemoteEnd>) -> IosMainList {
        let config = Config::ios("com.apple.MobileAddressBook");
        let manager = SessionManager::new(fake);
        let session = manager.create_session(&config).await.unwrap();
        IosMainList::attach(ElementResolver::new(session, &config))
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_dismisses_system_alert() {
        let fake = Arc::new(FakeRemoteEnd::new().with_popup());
        let page = attach_with(Arc::clone(&fake)).await;

        assert!(!fake.popup_visible());
        assert!(page.is_current_page().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_contact_exists_uses_substring_fallback() {
        let fake = Arc::new(FakeRemoteEnd::new().with_contacts(&["Ana Souza"]));
        let page = attach_with(fake).await;

        assert!(page.contact_exists("Ana Souza").await);
        assert!(!page.contact_exists("Bruno").await);
        assert_eq!(page.contact_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_contact_lands_on_detail() {
        let fake = Arc::new(FakeRemoteEnd::new().with_contacts(&["Ana Souza"]));
        let page = attach_with(fake).await;

        let detail = page.select_contact("Ana Souza").await.unwrap();
        assert_eq!(detail.screen(), Screen::Detail);
        assert!(detail.is_current_page().await);
    }
}
