//! The Android contact list.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::locator::{Locator, LocatorChain, xpath_literal};
use crate::pages::android::{AndroidAddForm, AndroidDetail, popups};
use crate::pages::{
    AddFormScreen, DetailScreen, MainListScreen, Op, PageState, Screen, any_present,
    dismiss_popups, log_navigation, wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// AndroidMainList
// ============================================================================

/// The AOSP contacts list, reached on app start and after every form or
/// detail exit.
#[derive(Debug)]
pub struct AndroidMainList {
    resolver: ElementResolver,
}

impl AndroidMainList {
    fn add_button() -> Locator {
        Locator::id("com.android.contacts:id/floating_action_button")
    }

    fn title() -> Locator {
        // The list title is localized on pt-BR devices.
        Locator::xpath("//android.widget.TextView[@text='Contacts' or @text='Contatos']")
    }

    fn search_field() -> Locator {
        Locator::id("com.android.contacts:id/search_view")
    }

    fn row_count() -> Locator {
        Locator::xpath("//android.widget.TextView[contains(@resource-id, 'contact_name')]")
    }

    /// Fallback chain for one contact row, strictest first: the name
    /// TextView by resource id and exact text, then exact text anywhere,
    /// then a substring match.
    fn row_chain(name: &str) -> LocatorChain {
        let literal = xpath_literal(name);
        LocatorChain::new(format!("contact row {name:?}"))
            .or(Locator::xpath(format!(
                "//android.widget.TextView[@resource-id='com.android.contacts:id/cliv_name_textview' and @text={literal}]"
            )))
            .or(Locator::xpath(format!(
                "//android.widget.TextView[@text={literal}]"
            )))
            .or(Locator::xpath(format!("//*[contains(@text, {literal})]")))
    }

    /// Attaches to the list: popup sweep, then load-wait on the title.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::MainList, &Self::title()).await?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl PageState for AndroidMainList {
    fn screen(&self) -> Screen {
        Screen::MainList
    }

    async fn is_current_page(&self) -> bool {
        any_present(&self.resolver, &[Self::title(), Self::add_button()]).await
    }

    async fn title(&self) -> String {
        self.resolver.read_text(&Self::title()).await
    }
}

#[async_trait]
impl MainListScreen for AndroidMainList {
    async fn add_contact(&self) -> Result<Box<dyn AddFormScreen>> {
        log_navigation(Screen::MainList, Op::AddContact);
        self.resolver.click(&Self::add_button()).await?;
        let form = AndroidAddForm::attach(self.resolver.clone()).await?;
        Ok(Box::new(form))
    }

    async fn select_contact(&self, name: &str) -> Result<Box<dyn DetailScreen>> {
        log_navigation(Screen::MainList, Op::SelectContact);
        let locator = self.resolver.first_present(&Self::row_chain(name)).await?;
        self.resolver.click(&locator).await?;
        let detail = AndroidDetail::attach(self.resolver.clone()).await?;
        Ok(Box::new(detail))
    }

    async fn contact_exists(&self, name: &str) -> bool {
        self.resolver
            .first_present(&Self::row_chain(name))
            .await
            .is_ok()
    }

    async fn has_contacts(&self) -> bool {
        self.resolver.count(&Self::row_count()).await > 0
    }

    async fn contact_count(&self) -> usize {
        self.resolver.count(&Self::row_count()).await
    }

    async fn search(&self, query: &str) -> Result<()> {
        log_navigation(Screen::MainList, Op::Search);
        if !self.has_contacts().await {
            warn!("Contact list is empty; skipping search");
            return Ok(());
        }
        let field = Self::search_field();
        if !self.resolver.is_present(&field).await {
            warn!("Search affordance not found; skipping search");
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
