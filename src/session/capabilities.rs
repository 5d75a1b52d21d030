//! Per-platform capability set construction.
//!
//! Capability building is table-driven: each platform lists its rows of
//! (capability key, configured override, default) in one function, so
//! platform differences stay localized here instead of leaking into session
//! code.
//!
//! # Defaults
//!
//! | Capability | Android | iOS |
//! |------------|---------|-----|
//! | `platformName` | `Android` | `iOS` |
//! | `platformVersion` | `9.0` | `17.2` |
//! | `deviceName` | `emulator-5556` | `iPhone 15 Pro` |
//! | `automationName` | `UiAutomator2` | `XCUITest` |
//! | app identity | `appPackage` + `appActivity` | `bundleId` |
//! | `noReset` | `true` | `true` |
//! | permissions | `autoGrantPermissions: true` | `autoAcceptAlerts: true` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::config::{Config, Platform};

// ============================================================================
// Capabilities
// ============================================================================

/// A capability set sent to the remote end when opening a session.
///
/// Values are JSON because the wire protocol mixes strings and booleans.
#[derive(Clone, Default, PartialEq)]
pub struct Capabilities {
    entries: FxHashMap<String, Value>,
}

impl Capabilities {
    /// Creates an empty capability set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the capability set for the configured platform.
    #[must_use]
    pub fn for_platform(config: &Config) -> Self {
        match config.platform {
            Platform::Android => Self::android(config),
            Platform::Ios => Self::ios(config),
        }
    }

    /// Sets a capability.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns a capability value, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns a capability as a string, if set and string-valued.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Returns the number of capabilities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no capabilities are set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the set as a JSON object for the wire.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted for stable log output.
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        let mut map = f.debug_map();
        for key in keys {
            map.entry(key, &self.entries[key]);
        }
        map.finish()
    }
}

// ============================================================================
// Platform tables
// ============================================================================

impl Capabilities {
    /// Android capability table.
    fn android(config: &Config) -> Self {
        let mut caps = Self::new();

        let rows: [(&str, Option<&str>, &str); 4] = [
            ("platformName", None, "Android"),
            ("platformVersion", config.platform_version.as_deref(), "9.0"),
            ("deviceName", config.device_name.as_deref(), "emulator-5556"),
            (
                "automationName",
                config.automation_name.as_deref(),
                "UiAutomator2",
            ),
        ];
        for (key, configured, default) in rows {
            caps.set(key, configured.unwrap_or(default));
        }

        if let Some(package) = &config.app_package {
            caps.set("appPackage", package.as_str());
        }
        if let Some(activity) = &config.app_activity {
            caps.set("appActivity", activity.as_str());
        }

        caps.set("noReset", config.no_reset);
        caps.set("autoGrantPermissions", config.auto_grant_permissions);
        caps
    }

    /// iOS capability table.
    fn ios(config: &Config) -> Self {
        let mut caps = Self::new();

        let rows: [(&str, Option<&str>, &str); 4] = [
            ("platformName", None, "iOS"),
            ("platformVersion", config.platform_version.as_deref(), "17.2"),
            ("deviceName", config.device_name.as_deref(), "iPhone 15 Pro"),
            (
                "automationName",
                config.automation_name.as_deref(),
                "XCUITest",
            ),
        ];
        for (key, configured, default) in rows {
            caps.set(key, configured.unwrap_or(default));
        }

        if let Some(bundle) = &config.bundle_id {
            caps.set("bundleId", bundle.as_str());
        }

        caps.set("noReset", config.no_reset);
        caps.set("autoAcceptAlerts", config.auto_accept_alerts);
        caps
    }
}

// ============================================================================
// Tests
// ============================================================================
