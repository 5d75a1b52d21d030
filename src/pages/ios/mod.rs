//! iOS implementations of the page traits.
//!
//! Locators target the built-in Contacts app driven through XCUITest,
//! leaning on accessibility identifiers where Apple assigns stable ones and
//! on element-type XPath where it does not.

use crate::locator::Locator;
use crate::pages::Popup;

mod add_form;
mod detail;
mod main_list;

pub use add_form::IosAddForm;
pub use detail::IosDetail;
pub use main_list::IosMainList;

/// System alerts iOS may stack over the app on first launch.
///
/// For these alerts the dismiss button is itself the presence probe.
pub(crate) fn popups() -> Vec<Popup> {
    ["Allow", "OK", "Continue", "Skip"]
        .into_iter()
        .map(|button| Popup {
            name: button,
            probe: Locator::accessibility_id(button),
            dismiss: Locator::accessibility_id(button),
        })
        .collect()
}
