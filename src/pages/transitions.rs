//! The screen graph: which operation moves the app from where to where.
//!
//! Navigation methods consult this table before acting, so the expected
//! destination is explicit in one place instead of implied by return types
//! scattered across page implementations. A `None` destination means the
//! operation leaves no verified screen behind and the caller must re-attach
//! through the factory.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Screen
// ============================================================================

/// The three logical screens of the contacts app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// The scrollable contact list with the add affordance.
    MainList,
    /// The new-contact form.
    AddForm,
    /// A single contact's detail view.
    Detail,
}

impl Screen {
    /// All screens, in navigation order from the app's entry point.
    pub const ALL: [Screen; 3] = [Screen::MainList, Screen::AddForm, Screen::Detail];

    /// Returns the screen name used in errors and logs.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainList => "MainList",
            Screen::AddForm => "AddForm",
            Screen::Detail => "Detail",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Op
// ============================================================================

/// Navigation-relevant operations a page can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Open the add-contact form from the list.
    AddContact,
    /// Open a contact's detail view from the list.
    SelectContact,
    /// Filter the list; stays on the list.
    Search,
    /// Commit the form.
    Save,
    /// Discard the form.
    CancelForm,
    /// Delete the contact through the overflow menu and confirm dialog.
    Delete,
    /// Open the delete confirm dialog, then back out of it.
    CancelDelete,
    /// Navigate up from the detail view.
    Back,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::AddContact => "AddContact",
            Op::SelectContact => "SelectContact",
            Op::Search => "Search",
            Op::Save => "Save",
            Op::CancelForm => "CancelForm",
            Op::Delete => "Delete",
            Op::CancelDelete => "CancelDelete",
            Op::Back => "Back",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Transition table
// ============================================================================

/// `(source screen, operation, verified destination)`.
///
/// `Save` and `CancelForm` deliberately verify nothing: the form closes with
/// platform-specific timing, so callers re-attach the list through the
/// factory instead of trusting an implicit destination.
pub const TRANSITIONS: &[(Screen, Op, Option<Screen>)] = &[
    (Screen::MainList, Op::AddContact, Some(Screen::AddForm)),
    (Screen::MainList, Op::SelectContact, Some(Screen::Detail)),
    (Screen::MainList, Op::Search, Some(Screen::MainList)),
    (Screen::AddForm, Op::Save, None),
    (Screen::AddForm, Op::CancelForm, None),
    (Screen::Detail, Op::Delete, Some(Screen::MainList)),
    (Screen::Detail, Op::CancelDelete, Some(Screen::Detail)),
    (Screen::Detail, Op::Back, Some(Screen::MainList)),
];

/// Looks up the verified destination of `op` performed on `from`.
///
/// Outer `None` means the operation is not defined on that screen; inner
/// `None` means the operation is defined but leaves no verified screen.
#[must_use]
pub fn transition(from: Screen, op: Op) -> Option<Option<Screen>> {
    TRANSITIONS
        .iter()
        .find(|(screen, candidate, _)| *screen == from && *candidate == op)
        .map(|(_, _, to)| *to)
}

// ============================================================================
// Tests
// ============================================================================
