//! The Android contact detail view.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::info;

use crate::contact::Contact;
use crate::error::Result;
use crate::locator::Locator;
use crate::pages::android::{AndroidMainList, popups};
use crate::pages::{
    DetailScreen, MainListScreen, Op, PageState, Screen, any_present, dismiss_popups,
    log_navigation, wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// AndroidDetail
// ============================================================================

/// A single contact opened from the list.
///
/// The detail card has no stable resource ids for the displayed values, so
/// the field reads below lean on text-shape heuristics the way manual
/// inspection of the AOSP hierarchy suggests.
#[derive(Debug)]
pub struct AndroidDetail {
    resolver: ElementResolver,
}

impl AndroidDetail {
    fn edit_button() -> Locator {
        Locator::id("com.android.contacts:id/menu_edit")
    }

    fn more_button() -> Locator {
        Locator::xpath("//android.widget.ImageButton[@content-desc='More options']")
    }

    fn delete_item() -> Locator {
        Locator::xpath("//android.widget.TextView[@text='Delete']")
    }

    fn confirm_button() -> Locator {
        Locator::id("android:id/button1")
    }

    fn dismiss_button() -> Locator {
        Locator::id("android:id/button2")
    }

    fn back_button() -> Locator {
        Locator::xpath("//android.widget.ImageButton[@content-desc='Navigate up']")
    }

    fn name_text() -> Locator {
        Locator::xpath("//android.widget.TextView[contains(@text, ' ')]")
    }

    fn phone_text() -> Locator {
        Locator::xpath("//android.widget.TextView[contains(@text, '(') or contains(@text, '+')]")
    }

    fn email_text() -> Locator {
        Locator::xpath("//android.widget.TextView[contains(@text, '@')]")
    }

    fn company_text() -> Locator {
        Locator::id("com.android.contacts:id/company_name")
    }

    /// Attaches to the detail view after a row click.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::Detail, &Self::edit_button()).await?;
        Ok(Self { resolver })
    }

    /// Opens the overflow menu and clicks through to the confirm dialog.
    async fn open_delete_dialog(&self) -> Result<()> {
        self.resolver.click(&Self::more_button()).await?;
        self.resolver.click(&Self::delete_item()).await
    }
}

#[async_trait]
impl PageState for AndroidDetail {
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
impl DetailScreen for AndroidDetail {
    async fn delete(&self) -> Result<Box<dyn MainListScreen>> {
        log_navigation(Screen::Detail, Op::Delete);
        self.open_delete_dialog().await?;
        self.resolver.click(&Self::confirm_button()).await?;
        info!("Contact deleted");
        let list = AndroidMainList::attach(self.resolver.clone()).await?;
        Ok(Box::new(list))
    }

    async fn cancel_delete(&self) -> Result<()> {
        log_navigation(Screen::Detail, Op::CancelDelete);
        self.open_delete_dialog().await?;
        self.resolver.click(&Self::dismiss_button()).await?;
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
        let list = AndroidMainList::attach(self.resolver.clone()).await?;
        Ok(Box::new(list))
    }
}

// ============================================================================
// Tests
// ============================================================================
