//! Android implementations of the page traits.
//!
//! Locators target the AOSP contacts app (`com.android.contacts`) driven
//! through UiAutomator2. All platform-specific knowledge lives in the
//! locator tables of these three files; behavior is shared through the
//! traits in [`crate::pages`].

use crate::locator::Locator;
use crate::pages::Popup;

mod add_form;
mod detail;
mod main_list;

pub use add_form::AndroidAddForm;
pub use detail::AndroidDetail;
pub use main_list::AndroidMainList;

/// System popups Android may show over the app on a fresh install.
pub(crate) fn popups() -> Vec<Popup> {
    vec![Popup {
        name: "runtime permission dialog",
        probe: Locator::id("com.android.permissioncontroller:id/text"),
        dismiss: Locator::id("com.android.permissioncontroller:id/left_button"),
    }]
}
