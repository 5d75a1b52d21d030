//! The iOS contact detail view.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::info;

use crate::contact::Contact;
use crate::error::Result;
use crate::locator::Locator;
use crate::pages::ios::{IosMainList, popups};
use crate::pages::{
    DetailScreen, MainListScreen, Op, PageState, Screen, any_present, dismiss_popups,
    log_navigation, wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// IosDetail
// ============================================================================

/// A single contact's card.
///
/// The "Delete Contact" label appears twice during deletion: once as the
/// menu entry and once on the confirm sheet, so the same locator is tapped
/// twice in sequence.
#[derive(Debug)]
pub struct IosDetail {
    resolver: ElementResolver,
}

impl IosDetail {
    fn edit_button() -> Locator {
        Locator::accessibility_id("Edit")
    }

    fn more_button() -> Locator {
        Locator::accessibility_id("More")
    }

    fn delete_button() -> Locator {
        Locator::xpath("//XCUIElementTypeButton[@name='Delete Contact']")
    }

    fn cancel_button() -> Locator {
        Locator::accessibility_id("Cancel")
    }

    fn back_button() -> Locator {
        Locator::xpath("//XCUIElementTypeButton[@name='Contacts']")
    }

    fn name_text() -> Locator {
        Locator::xpath("//XCUIElementTypeStaticText[contains(@name, ' ')]")
    }

    fn phone_text() -> Locator {
        Locator::xpath(
            "//XCUIElementTypeStaticText[contains(@value, '(') or contains(@value, '+')]",
        )
    }

    fn email_text() -> Locator {
        Locator::xpath("//XCUIElementTypeStaticText[contains(@value, '@')]")
    }

    fn company_text() -> Locator {
        Locator::xpath("//XCUIElementTypeStaticText[@name='CompanyName']")
    }

    /// Attaches to the card after a row tap.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::Detail, &Self::edit_button()).await?;
        Ok(Self { resolver })
    }

    /// Opens the overflow menu and taps through to the confirm sheet.
    async fn open_delete_sheet(&self) -> Result<()> {
        self.resolver.click(&Self::more_button()).await?;
        self.resolver.click(&Self::delete_button()).await
    }
}

#[async_trait]
impl PageState for IosDetail {
    fn screen(&self) -> Screen {
        Screen::Detail
    }

    async fn is_current_page(&self) -> bool {
        any_present(&self.resolver, &[Self::edit_button(), Self::more_button()]).await
    }

    async fn title(&self) -> String {
        self.resolver.read_text(&Self::name_text()).await
    }
}

#[async_trait]
impl DetailScreen for IosDetail {
    async fn delete(&self) -> Result<Box<dyn MainListScreen>> {
        log_navigation(Screen::Detail, Op::Delete);
        self.open_delete_sheet().await?;
        // Second tap hits the confirm sheet's button of the same name.
        self.resolver.click(&Self::delete_button()).await?;
        info!("Contact deleted");
        let list = IosMainList::attach(self.resolver.clone()).await?;
        Ok(Box::new(list))
    }

    async fn cancel_delete(&self) -> Result<()> {
        log_navigation(Screen::Detail, Op::CancelDelete);
        self.open_delete_sheet().await?;
        self.resolver.click(&Self::cancel_button()).await?;
        wait_for_page_load(&self.resolver, Screen::Detail, &Self::edit_button()).await
    }

    async fn contact_details(&self) -> Contact {
        Contact {
            name: self.resolver.read_text(&Self::name_text()).await,
            phone: self.resolver.read_text(&Self::phone_text()).await,
            email: self.resolver.read_text(&Self::email_text()).await,
            company: self.resolver.read_text(&Self::company_text()).await,
        }
    }

    async fn back(&self) -> Result<Box<dyn MainListScreen>> {
        log_navigation(Screen::Detail, Op::Back);
        self.resolver.click(&Self::back_button()).await?;
        let list = IosMainList::attach(self.resolver.clone()).await?;
        Ok(Box::new(list))
    }
}

// ============================================================================
// Tests
// ============================================================================
