//! The Android new-contact form.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use crate::contact::Contact;
use crate::error::Result;
use crate::locator::Locator;
use crate::pages::android::popups;
use crate::pages::{
    AddFormScreen, Op, PageState, Screen, any_present, dismiss_popups, log_navigation,
    wait_for_page_load,
};
use crate::resolver::ElementResolver;

// ============================================================================
// AndroidAddForm
// ============================================================================

/// The contact editor opened by the list's add button.
///
/// The AOSP editor exposes no company field; [`Contact::company`] is
/// ignored here.
#[derive(Debug)]
pub struct AndroidAddForm {
    resolver: ElementResolver,
}

impl AndroidAddForm {
    fn field(label: &str) -> Locator {
        Locator::xpath(format!("//android.widget.EditText[@text='{label}']"))
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

    fn save_button() -> Locator {
        Locator::id("com.android.contacts:id/editor_menu_save_button")
    }

    fn cancel_button() -> Locator {
        Locator::xpath("//android.widget.ImageButton[@content-desc='Cancel']")
    }

    fn title() -> Locator {
        Locator::xpath("//android.widget.TextView[@text='Create new contact']")
    }

    /// Attaches to the form after the add button was clicked.
    pub(crate) async fn attach(resolver: ElementResolver) -> Result<Self> {
        dismiss_popups(&resolver, &popups()).await;
        wait_for_page_load(&resolver, Screen::AddForm, &Self::title()).await?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl PageState for AndroidAddForm {
    fn screen(&self) -> Screen {
        Screen::AddForm
    }

    async fn is_current_page(&self) -> bool {
        any_present(&self.resolver, &[Self::title(), Self::save_button()]).await
    }

    async fn title(&self) -> String {
        self.resolver.read_text(&Self::title()).await
    }
}

#[async_trait]
impl AddFormScreen for AndroidAddForm {
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
            debug!("Editor has no company field; skipping company");
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
