//! Contact data record passed into form-filling operations.
//!
//! The engine never owns or mutates contacts; callers build one and hand a
//! reference to [`crate::pages::AddFormScreen::fill`].
//!
//! ```
//! use appium_pages::Contact;
//!
//! let contact = Contact::builder()
//!     .name("Fábio Fernandes")
//!     .phone("(11) 99999-9999")
//!     .email("fabio@teste.com")
//!     .company("Empresa Teste")
//!     .build();
//!
//! assert_eq!(contact.first_name(), "Fábio");
//! assert_eq!(contact.last_name(), "Fernandes");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Contact
// ============================================================================

/// Immutable contact value object.
///
/// Fields left unset default to the empty string, mirroring how the contacts
/// app treats blank form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Full display name.
    pub name: String,
    /// Phone number, formatted as the app should display it.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Company name (only iOS exposes a company field on the add form).
    pub company: String,
}

impl Contact {
    /// Creates a contact with name and phone, the two fields every platform
    /// form exposes.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Creates a builder for constructing a contact field by field.
    #[inline]
    #[must_use]
    pub fn builder() -> ContactBuilder {
        ContactBuilder::default()
    }

    /// Returns the first word of the name.
    ///
    /// Both native add forms split the display name into first/last fields.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_once(' ').map_or(self.name.as_str(), |(first, _)| first)
    }

    /// Returns everything after the first word of the name, or `""` for a
    /// single-word name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.name.split_once(' ').map_or("", |(_, rest)| rest)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.phone)
    }
}

// ============================================================================
// ContactBuilder
// ============================================================================

/// Builder for [`Contact`].
#[derive(Debug, Clone, Default)]
pub struct ContactBuilder {
    name: String,
    phone: String,
    email: String,
    company: String,
}

impl ContactBuilder {
    /// Sets the full display name.
    #[inline]
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the phone number.
    #[inline]
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the email address.
    #[inline]
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the company name.
    #[inline]
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Builds the contact.
    #[inline]
    #[must_use]
    pub fn build(self) -> Contact {
        Contact {
            name: self.name,
            phone: self.phone,
            email: self.email,
            company: self.company,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
