//! Test doubles: an in-memory contacts app behind the remote traits.
//!
//! [`FakeRemoteEnd`] hands out handles over one shared app model, so a test
//! can drive pages through the public API and then assert on the model
//! directly. Locators are interpreted by inspecting their value strings the
//! same way the real locator tables are written, which keeps the fake honest
//! about which strategy actually matched.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::Platform;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::locator::Locator;
use crate::session::{Capabilities, RemoteEnd, RemoteHandle};

/// Installs a fmt subscriber for test output. Repeat calls are no-ops.
#[allow(dead_code)]
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// App model
// ============================================================================

/// One stored contact in the fake app.
#[derive(Debug, Clone)]
struct StoredContact {
    name: String,
    phone: String,
    email: String,
    company: String,
}

/// Which screen the fake app currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FakeScreen {
    MainList,
    AddForm,
    Detail(usize),
}

/// Text typed into the add form so far.
#[derive(Debug, Default, Clone)]
struct Draft {
    first: String,
    last: String,
    phone: String,
    email: String,
    company: String,
}

/// Mutable app state shared by every handle of one fake end.
#[derive(Debug)]
struct AppState {
    platform: Platform,
    screen: FakeScreen,
    contacts: Vec<StoredContact>,
    draft: Draft,
    menu_open: bool,
    confirm_open: bool,
    popup_visible: bool,
    popup_dismiss_fails: bool,
    search_query: String,
}

// ============================================================================
// FakeRemoteEnd
// ============================================================================

/// A remote end that simulates the contacts app in memory.
pub(crate) struct FakeRemoteEnd {
    state: Arc<Mutex<AppState>>,
    fail_open: Mutex<Option<String>>,
    open_count: AtomicUsize,
    close_count: Arc<AtomicUsize>,
    find_log: Arc<Mutex<Vec<String>>>,
}

impl FakeRemoteEnd {
    /// A fresh app on the main list with no contacts.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState {
                platform: Platform::Android,
                screen: FakeScreen::MainList,
                contacts: Vec::new(),
                draft: Draft::default(),
                menu_open: false,
                confirm_open: false,
                popup_visible: false,
                popup_dismiss_fails: false,
                search_query: String::new(),
            })),
            fail_open: Mutex::new(None),
            open_count: AtomicUsize::new(0),
            close_count: Arc::new(AtomicUsize::new(0)),
            find_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seeds contacts by name with placeholder details.
    pub(crate) fn with_contacts(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock();
            for name in names {
                state.contacts.push(StoredContact {
                    name: (*name).to_string(),
                    phone: "(11) 90000-0000".to_string(),
                    email: String::new(),
                    company: String::new(),
                });
            }
        }
        self
    }

    /// Seeds one fully specified contact.
    pub(crate) fn with_contact(self, name: &str, phone: &str, email: &str, company: &str) -> Self {
        self.state.lock().contacts.push(StoredContact {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            company: company.to_string(),
        });
        self
    }

    /// Shows a permission popup over the first screen.
    pub(crate) fn with_popup(self) -> Self {
        self.state.lock().popup_visible = true;
        self
    }

    /// Shows a popup whose dismiss button fails on click.
    pub(crate) fn with_failing_popup(self) -> Self {
        {
            let mut state = self.state.lock();
            state.popup_visible = true;
            state.popup_dismiss_fails = true;
        }
        self
    }

    /// Makes every `open` call fail with `message`.
    pub(crate) fn failing_open(self, message: &str) -> Self {
        *self.fail_open.lock() = Some(message.to_string());
        self
    }

    /// How many times a handle's `close` ran.
    pub(crate) fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    /// How many sessions were opened.
    #[allow(dead_code)]
    pub(crate) fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// Every locator passed to `find`, in call order.
    pub(crate) fn find_log(&self) -> Vec<String> {
        self.find_log.lock().clone()
    }

    /// Whether the popup is still showing.
    pub(crate) fn popup_visible(&self) -> bool {
        self.state.lock().popup_visible
    }

    /// Names of the stored contacts, in list order.
    pub(crate) fn contact_names(&self) -> Vec<String> {
        self.state.lock().contacts.iter().map(|c| c.name.clone()).collect()
    }

    /// Text typed into the search field so far.
    pub(crate) fn search_query(&self) -> String {
        self.state.lock().search_query.clone()
    }
}

#[async_trait]
impl RemoteEnd for FakeRemoteEnd {
    async fn open(&self, capabilities: &Capabilities) -> Result<Box<dyn RemoteHandle>> {
        if let Some(message) = self.fail_open.lock().clone() {
            return Err(Error::remote(message));
        }
        self.open_count.fetch_add(1, Ordering::SeqCst);
        let platform = match capabilities.get_str("platformName") {
            Some("iOS") => Platform::Ios,
            _ => Platform::Android,
        };
        self.state.lock().platform = platform;
        Ok(Box::new(FakeHandle {
            state: Arc::clone(&self.state),
            close_count: Arc::clone(&self.close_count),
            find_log: Arc::clone(&self.find_log),
        }))
    }
}

// ============================================================================
// FakeHandle
// ============================================================================

/// Remote roles the fake can resolve a locator to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Role {
    AddButton,
    ContactList,
    ListTitle,
    Search,
    EmptyMessage,
    Row(usize),
    RowCount,
    FieldFirst,
    FieldLast,
    FieldPhone,
    FieldEmail,
    FieldCompany,
    SaveButton,
    CancelButton,
    FormTitle,
    EditButton,
    MoreButton,
    DeleteMenuItem,
    ConfirmButton,
    ConfirmCancel,
    BackButton,
    NameText,
    PhoneText,
    EmailText,
    CompanyText,
    PopupText,
    PopupDismiss,
}

pub(crate) struct FakeHandle {
    state: Arc<Mutex<AppState>>,
    close_count: Arc<AtomicUsize>,
    find_log: Arc<Mutex<Vec<String>>>,
}

/// Extracts the quoted argument following `pat`, e.g. the `N` in
/// `contains(@text, 'N')` for `pat = "contains(@text, '"`.
fn quoted_after<'a>(value: &'a str, pat: &str) -> Option<&'a str> {
    let start = value.find(pat)? + pat.len();
    let rest = &value[start..];
    let end = rest.find('\'')?;
    Some(&rest[..end])
}

impl FakeHandle {
    /// Maps a locator onto roles visible in the current app state.
    fn resolve(&self, locator: &Locator) -> Vec<Role> {
        let state = self.state.lock();
        let value = locator.value();

        // Popup chrome is findable only while the popup shows.
        if value.contains("permission") && value.ends_with("id/text") {
            return if state.popup_visible { vec![Role::PopupText] } else { vec![] };
        }
        if value.ends_with("left_button")
            || matches!(value, "Allow" | "OK" | "Continue" | "Skip")
            || ["'Allow'", "'OK'", "'Continue'", "'Skip'"].iter().any(|b| value.contains(b))
        {
            return if state.popup_visible { vec![Role::PopupDismiss] } else { vec![] };
        }

        let candidates = Self::classify(&state, value);
        candidates
            .into_iter()
            .filter(|role| Self::visible(&state, role))
            .collect()
    }

    /// Static classification of a locator value, before visibility.
    fn classify(state: &AppState, value: &str) -> Vec<Role> {
        // Fixed chrome first, so label text never reads as a contact name.
        if value.contains("floating_action_button") || value == "Add" {
            return vec![Role::AddButton];
        }
        if value.ends_with("id/contact_list") || value.contains("'ContactsList'") {
            return vec![Role::ContactList];
        }
        if value.contains("@text='Contacts' or @text='Contatos'")
            || (value.contains("NavigationBar") && value.contains("'Contacts'"))
        {
            return vec![Role::ListTitle];
        }
        if value.contains("Button") && value.contains("'Contacts'") {
            return vec![Role::BackButton];
        }
        if value.contains("search") || value.contains("Search") {
            return vec![Role::Search];
        }
        if value.ends_with("id/message") || value.contains("'No Contacts'") {
            return vec![Role::EmptyMessage];
        }
        if value.contains("'First name'") {
            return vec![Role::FieldFirst];
        }
        if value.contains("'Last name'") {
            return vec![Role::FieldLast];
        }
        if value.contains("'Phone'") {
            return vec![Role::FieldPhone];
        }
        if value.contains("'Email'") {
            return vec![Role::FieldEmail];
        }
        if value.contains("'Company'") {
            return vec![Role::FieldCompany];
        }
        if value.contains("editor_menu_save_button") || value == "Done" || value.contains("'Done'") {
            return vec![Role::SaveButton];
        }
        if value == "Cancel" || value.contains("'Cancel'") {
            // Same label cancels the confirm sheet while it is open.
            return if state.confirm_open {
                vec![Role::ConfirmCancel]
            } else {
                vec![Role::CancelButton]
            };
        }
        if value.contains("'Create new contact'") || value.contains("'New Contact'") {
            return vec![Role::FormTitle];
        }
        if value.ends_with("id/menu_edit") || value == "Edit" || value.contains("'Edit'") {
            return vec![Role::EditButton];
        }
        if value.contains("'More options'") || value == "More" || value.contains("'More'") {
            return vec![Role::MoreButton];
        }
        if value.contains("'Delete Contact'") {
            // iOS uses the same label for the menu item and the confirm
            // sheet; the confirm dialog wins while it is open.
            return if state.confirm_open {
                vec![Role::ConfirmButton]
            } else {
                vec![Role::DeleteMenuItem]
            };
        }
        if value.contains("@text='Delete'") {
            return vec![Role::DeleteMenuItem];
        }
        if value.ends_with("android:id/button1") {
            return vec![Role::ConfirmButton];
        }
        if value.ends_with("android:id/button2") {
            return vec![Role::ConfirmCancel];
        }
        if value.ends_with("id/company_name") || value.contains("'CompanyName'") {
            return vec![Role::CompanyText];
        }
        if value.contains("'Navigate up'") {
            return vec![Role::BackButton];
        }
        if value.contains("contains(@text, ' ')") || value.contains("contains(@name, ' ')") {
            return vec![Role::NameText];
        }
        if value.contains("'('") || value.contains("'+'") || value.contains("contains(@value, '(')") {
            return vec![Role::PhoneText];
        }
        if value.contains("'@'") {
            return vec![Role::EmailText];
        }
        if value.contains("contains(@resource-id, 'contact_name')") {
            return vec![Role::RowCount];
        }

        // Contact rows, exact match first.
        for pat in ["and @text='", "[@text='", "[@name='"] {
            if let Some(name) = quoted_after(value, pat) {
                if let Some(idx) = state.contacts.iter().position(|c| c.name == name) {
                    return vec![Role::Row(idx)];
                }
                return vec![];
            }
        }
        for pat in ["contains(@text, '", "contains(@name, '", "contains(@value, '"] {
            if let Some(fragment) = quoted_after(value, pat) {
                if let Some(idx) = state.contacts.iter().position(|c| c.name.contains(fragment)) {
                    return vec![Role::Row(idx)];
                }
                return vec![];
            }
        }

        // Bare cell selector counts every row.
        if value.contains("XCUIElementTypeCell") {
            return vec![Role::RowCount];
        }

        vec![]
    }

    /// Whether a role exists on the current screen.
    fn visible(state: &AppState, role: &Role) -> bool {
        match role {
            Role::AddButton | Role::ContactList | Role::ListTitle | Role::Search => {
                state.screen == FakeScreen::MainList
            }
            Role::EmptyMessage => state.screen == FakeScreen::MainList && state.contacts.is_empty(),
            Role::Row(_) | Role::RowCount => state.screen == FakeScreen::MainList,
            Role::FieldFirst | Role::FieldLast | Role::FieldPhone | Role::FieldEmail
            | Role::SaveButton | Role::CancelButton | Role::FormTitle => {
                state.screen == FakeScreen::AddForm
            }
            Role::FieldCompany => {
                state.screen == FakeScreen::AddForm && state.platform == Platform::Ios
            }
            Role::EditButton | Role::MoreButton | Role::BackButton | Role::NameText
            | Role::PhoneText => matches!(state.screen, FakeScreen::Detail(_)),
            Role::EmailText => match state.screen {
                FakeScreen::Detail(idx) => !state.contacts[idx].email.is_empty(),
                _ => false,
            },
            Role::CompanyText => match state.screen {
                FakeScreen::Detail(idx) => !state.contacts[idx].company.is_empty(),
                _ => false,
            },
            Role::DeleteMenuItem => {
                matches!(state.screen, FakeScreen::Detail(_)) && state.menu_open
            }
            Role::ConfirmButton | Role::ConfirmCancel => {
                matches!(state.screen, FakeScreen::Detail(_)) && state.confirm_open
            }
            Role::PopupText | Role::PopupDismiss => state.popup_visible,
        }
    }

    fn encode(role: &Role) -> ElementId {
        let tag = match role {
            Role::AddButton => "btn.add".to_string(),
            Role::ContactList => "list".to_string(),
            Role::ListTitle => "title.list".to_string(),
            Role::Search => "search".to_string(),
            Role::EmptyMessage => "msg.empty".to_string(),
            Role::Row(idx) => format!("row.{idx}"),
            Role::RowCount => "rowcount".to_string(),
            Role::FieldFirst => "field.first".to_string(),
            Role::FieldLast => "field.last".to_string(),
            Role::FieldPhone => "field.phone".to_string(),
            Role::FieldEmail => "field.email".to_string(),
            Role::FieldCompany => "field.company".to_string(),
            Role::SaveButton => "btn.save".to_string(),
            Role::CancelButton => "btn.cancel".to_string(),
            Role::FormTitle => "title.form".to_string(),
            Role::EditButton => "btn.edit".to_string(),
            Role::MoreButton => "btn.more".to_string(),
            Role::DeleteMenuItem => "menu.delete".to_string(),
            Role::ConfirmButton => "dlg.confirm".to_string(),
            Role::ConfirmCancel => "dlg.cancel".to_string(),
            Role::BackButton => "btn.back".to_string(),
            Role::NameText => "text.name".to_string(),
            Role::PhoneText => "text.phone".to_string(),
            Role::EmailText => "text.email".to_string(),
            Role::CompanyText => "text.company".to_string(),
            Role::PopupText => "popup.text".to_string(),
            Role::PopupDismiss => "popup.dismiss".to_string(),
        };
        ElementId::new(tag)
    }
}

#[async_trait]
impl RemoteHandle for FakeHandle {
    async fn find(&self, locator: &Locator) -> Result<Vec<ElementId>> {
        self.find_log.lock().push(locator.to_string());
        let roles = self.resolve(locator);
        if roles == [Role::RowCount] {
            let rows = self.state.lock().contacts.len();
            return Ok((0..rows).map(|idx| Self::encode(&Role::Row(idx))).collect());
        }
        Ok(roles.iter().map(Self::encode).collect())
    }

    async fn click(&self, element: &ElementId) -> Result<()> {
        let mut state = self.state.lock();
        match element.as_str() {
            "popup.dismiss" => {
                if state.popup_dismiss_fails {
                    return Err(Error::remote("popup dismiss rejected"));
                }
                state.popup_visible = false;
            }
            "btn.add" => {
                state.screen = FakeScreen::AddForm;
                state.draft = Draft::default();
            }
            "btn.save" => {
                let draft = std::mem::take(&mut state.draft);
                let name = format!("{} {}", draft.first.trim(), draft.last.trim())
                    .trim()
                    .to_string();
                state.contacts.push(StoredContact {
                    name,
                    phone: draft.phone,
                    email: draft.email,
                    company: draft.company,
                });
                state.screen = FakeScreen::MainList;
            }
            "btn.cancel" => {
                state.draft = Draft::default();
                state.screen = FakeScreen::MainList;
            }
            "btn.more" => state.menu_open = true,
            "menu.delete" => {
                state.menu_open = false;
                state.confirm_open = true;
            }
            "dlg.confirm" => {
                if let FakeScreen::Detail(idx) = state.screen {
                    state.contacts.remove(idx);
                }
                state.confirm_open = false;
                state.screen = FakeScreen::MainList;
            }
            "dlg.cancel" => state.confirm_open = false,
            "btn.back" => state.screen = FakeScreen::MainList,
            other if other.starts_with("row.") => {
                let idx: usize = other["row.".len()..]
                    .parse()
                    .map_err(|_| Error::remote(format!("stale element: {other}")))?;
                if idx >= state.contacts.len() {
                    return Err(Error::remote(format!("stale element: {other}")));
                }
                state.screen = FakeScreen::Detail(idx);
            }
            _ => {}
        }
        Ok(())
    }

    async fn clear(&self, element: &ElementId) -> Result<()> {
        let mut state = self.state.lock();
        match element.as_str() {
            "field.first" => state.draft.first.clear(),
            "field.last" => state.draft.last.clear(),
            "field.phone" => state.draft.phone.clear(),
            "field.email" => state.draft.email.clear(),
            "field.company" => state.draft.company.clear(),
            "search" => state.search_query.clear(),
            _ => {}
        }
        Ok(())
    }

    async fn send_keys(&self, element: &ElementId, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        match element.as_str() {
            "field.first" => state.draft.first.push_str(text),
            "field.last" => state.draft.last.push_str(text),
            "field.phone" => state.draft.phone.push_str(text),
            "field.email" => state.draft.email.push_str(text),
            "field.company" => state.draft.company.push_str(text),
            "search" => state.search_query.push_str(text),
            other => return Err(Error::remote(format!("element not editable: {other}"))),
        }
        Ok(())
    }

    async fn text(&self, element: &ElementId) -> Result<String> {
        let state = self.state.lock();
        let detail = |f: fn(&StoredContact) -> &str| match state.screen {
            FakeScreen::Detail(idx) => f(&state.contacts[idx]).to_string(),
            _ => String::new(),
        };
        let text = match element.as_str() {
            "title.list" => "Contacts".to_string(),
            "title.form" => match state.platform {
                Platform::Android => "Create new contact".to_string(),
                Platform::Ios => "New Contact".to_string(),
            },
            "msg.empty" => "No contacts".to_string(),
            "popup.text" => "Allow Contacts to access your data?".to_string(),
            "text.name" => detail(|c| &c.name),
            "text.phone" => detail(|c| &c.phone),
            "text.email" => detail(|c| &c.email),
            "text.company" => detail(|c| &c.company),
            other if other.starts_with("row.") => {
                let idx: usize = other["row.".len()..].parse().unwrap_or(usize::MAX);
                state
                    .contacts
                    .get(idx)
                    .map(|c| c.name.clone())
                    .unwrap_or_default()
            }
            _ => String::new(),
        };
        Ok(text)
    }

    async fn is_enabled(&self, _element: &ElementId) -> Result<bool> {
        Ok(true)
    }

    async fn set_implicit_wait(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
