//! Element locator strategies and fallback chains.
//!
//! A [`Locator`] is an immutable description of how to find zero-or-more UI
//! elements on the device. A [`LocatorChain`] is an ordered list of locators
//! that describe alternative ways to find semantically the same element; the
//! resolver tries them in sequence until one resolves.
//!
//! # Example
//!
//! ```
//! use appium_pages::{Locator, LocatorChain};
//!
//! // Resource ID (Android) or element ID
//! let add = Locator::id("com.android.contacts:id/floating_action_button");
//!
//! // XPath
//! let title = Locator::xpath("//android.widget.TextView[@text='Contacts']");
//!
//! // Fallback chain: exact id match, then exact text, then substring
//! let chain = LocatorChain::new("contact row \"Ana\"")
//!     .or(Locator::xpath("//android.widget.TextView[@resource-id='x' and @text='Ana']"))
//!     .or(Locator::xpath("//android.widget.TextView[@text='Ana']"))
//!     .or(Locator::xpath("//android.widget.TextView[contains(@text, 'Ana')]"));
//! assert_eq!(chain.len(), 3);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Locator
// ============================================================================

/// Element locator strategy.
///
/// The query string is platform-specific (Android resource IDs and view-class
/// XPath, iOS accessibility-tree XPath); the strategy names are the ones the
/// remote automation protocol understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum Locator {
    /// Native element ID (Android resource-id).
    ///
    /// # Example
    /// ```ignore
    /// Locator::id("com.android.contacts:id/menu_edit")
    /// ```
    #[serde(rename = "id")]
    Id(String),

    /// Accessibility identifier (iOS accessibility id / Android content-desc).
    #[serde(rename = "accessibility id")]
    AccessibilityId(String),

    /// XPath over the native UI tree.
    ///
    /// # Example
    /// ```ignore
    /// Locator::xpath("//XCUIElementTypeButton[@name='Add']")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Native widget class name.
    #[serde(rename = "class name")]
    ClassName(String),
}

impl Locator {
    /// Creates an ID locator.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates an accessibility ID locator.
    #[inline]
    pub fn accessibility_id(id: impl Into<String>) -> Self {
        Self::AccessibilityId(id.into())
    }

    /// Creates an XPath locator.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates a class name locator.
    #[inline]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Returns the strategy name for the wire protocol.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::AccessibilityId(_) => "accessibility id",
            Self::XPath(_) => "xpath",
            Self::ClassName(_) => "class name",
        }
    }

    /// Returns the query string.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::AccessibilityId(v) | Self::XPath(v) | Self::ClassName(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// XPath literals
// ============================================================================

/// Quotes a string as an XPath literal.
///
/// Contact names come from test data and may contain apostrophes; XPath 1.0
/// has no escape sequence inside string literals, so names containing `'`
/// are rendered with `concat()`.
#[must_use]
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    // Mixed quotes: split on apostrophes and stitch them back with concat().
    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

// ============================================================================
// LocatorChain
// ============================================================================

/// Ordered fallback chain of locators for one logical element.
///
/// Carries the logical element name so that an exhausted chain produces an
/// error naming what was being looked for, not just which queries failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorChain {
    element: String,
    locators: Vec<Locator>,
}

impl LocatorChain {
    /// Creates an empty chain for the named logical element.
    #[must_use]
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            locators: Vec::new(),
        }
    }

    /// Appends a fallback locator.
    #[must_use]
    pub fn or(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    /// Returns the logical element name.
    #[inline]
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Returns the locators in fallback order.
    #[inline]
    #[must_use]
    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    /// Returns the number of fallback locators.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Returns `true` if the chain holds no locators.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl fmt::Display for LocatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} locators]", self.element, self.locators.len())
    }
}

// ============================================================================
// Tests
// ============================================================================
