//! The iOS new-contact form.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use crate::contact::Contact;
use crate::error::Result;
use crate::locator::Locator;
use crate::pages::ios::popups;
use crate::pages::{
    AddFormScreen, Op, PageState, Screen, any_present, dismiss_popups, log_navigation,
    wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// IosAddForm
// ============================================================================

/// The New Contact sheet. Unlike Android, the iOS form carries a company
/// field.
#[derive(Debug)]
pub struct IosAddForm {
    resolver: ElementResolver,
}

impl IosAddForm {
    fn field(name: &str) -> Locator {
        Locator::xpath(format!("//XCUIElementTypeTextField[@name='{name}']"))
    }

    fn first_name_field() -> Locator {
        Self::field("First name")
    }

    fn last_name_field() -> Locator {
        Self::field("Last name")
    }

    fn phone_field() -> Locator {
        Self::field("Phone")
    }

    fn email_field() -> Locator {
        Self::field("Email")
    }

    fn company_field() -> Locator {
        Self::field("Company")
    }

    fn save_button() -> Locator {
        Locator::accessibility_id("Done")
    }

    fn cancel_button() -> Locator {
        Locator::accessibility_id("Cancel")
    }

    fn navigation_bar() -> Locator {
        Locator::xpath("//XCUIElementTypeNavigationBar[@name='New Contact']")
    }

    /// Attaches to the sheet after the add button was tapped.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::AddForm, &Self::navigation_bar()).await?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl PageState for IosAddForm {
    fn screen(&self) -> Screen {
        Screen::AddForm
    }

    async fn is_current_page(&self) -> bool {
        any_present(&self.resolver, &[Self::navigation_bar(), Self::save_button()]).await
    }

    async fn title(&self) -> String {
        self.resolver.read_text(&Self::navigation_bar()).await
    }
}

#[async_trait]
impl AddFormScreen for IosAddForm {
    async fn fill(&self, contact: &Contact) -> Result<()> {
        self.resolver
            .type_text(&Self::first_name_field(), contact.first_name())
            .await?;
        if !contact.last_name().is_empty() {
            self.resolver
                .type_text(&Self::last_name_field(), contact.last_name())
                .await?;
        }
        self.resolver
            .type_text(&Self::phone_field(), &contact.phone)
            .await?;
        if !contact.email.is_empty() {
            self.resolver
                .type_text(&Self::email_field(), &contact.email)
                .await?;
        }
        if !contact.company.is_empty() {
            self.resolver
                .type_text(&Self::company_field(), &contact.company)
                .await?;
        }
        debug!(name = %contact.name, "Filled contact form");
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        log_navigation(Screen::AddForm, Op::Save);
        self.resolver.click(&Self::save_button()).await
    }

    async fn cancel(&self) -> Result<()> {
        log_navigation(Screen::AddForm, Op::CancelForm);
        self.resolver.click(&Self::cancel_button()).await
    }
}

// ============================================================================
// Tests
// ============================================================================
