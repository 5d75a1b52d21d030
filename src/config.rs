//! Engine configuration: platform selector, app identity, timeout knobs.
//!
//! Everything has a documented default; a runnable configuration needs only
//! the platform and the app identifier:
//!
//! ```
//! use appium_pages::Config;
//!
//! let config = Config::android("com.android.contacts", ".activities.PeopleActivity")
//!     .with_device_name("emulator-5554")
//!     .with_explicit_wait_secs(30);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// Platform
// ============================================================================

/// Target mobile platform.
///
/// Parsed case-insensitively from configuration; anything other than the two
/// supported values is rejected with [`Error::UnsupportedPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android, automated via UiAutomator2.
    Android,
    /// iOS, automated via XCUITest.
    Ios,
}

impl Platform {
    /// Returns the configuration string for this platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(Error::unsupported_platform(other)),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Session-level implicit wait applied by the remote end (seconds).
const DEFAULT_IMPLICIT_WAIT_SECS: u64 = 10;

/// Per-action explicit wait used by the resolver (seconds).
const DEFAULT_EXPLICIT_WAIT_SECS: u64 = 20;

/// Short timeout for presence probes and fallback-chain attempts (seconds).
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Load budget for a page's identifying locator (seconds).
const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 10;

fn default_implicit_wait() -> u64 {
    DEFAULT_IMPLICIT_WAIT_SECS
}

fn default_explicit_wait() -> u64 {
    DEFAULT_EXPLICIT_WAIT_SECS
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_page_load_timeout() -> u64 {
    DEFAULT_PAGE_LOAD_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Config
// ============================================================================

/// Engine configuration.
///
/// Capability overrides left as `None` fall back to the per-platform defaults
/// documented in [`crate::session::Capabilities`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target platform.
    pub platform: Platform,

    /// Android application package (`appPackage`).
    #[serde(default)]
    pub app_package: Option<String>,

    /// Android launch activity (`appActivity`).
    #[serde(default)]
    pub app_activity: Option<String>,

    /// iOS bundle identifier (`bundleId`).
    #[serde(default)]
    pub bundle_id: Option<String>,

    /// Device name override (emulator/simulator name).
    #[serde(default)]
    pub device_name: Option<String>,

    /// OS version override.
    #[serde(default)]
    pub platform_version: Option<String>,

    /// Automation engine override.
    #[serde(default)]
    pub automation_name: Option<String>,

    /// Keep app state between sessions (`noReset`). Defaults to `true`.
    #[serde(default = "default_true")]
    pub no_reset: bool,

    /// Android: grant all permissions up front. Defaults to `true`.
    #[serde(default = "default_true")]
    pub auto_grant_permissions: bool,

    /// iOS: accept system alerts automatically. Defaults to `true`.
    #[serde(default = "default_true")]
    pub auto_accept_alerts: bool,

    /// Session-level implicit wait, in seconds. Defaults to 10.
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_secs: u64,

    /// Per-action explicit wait, in seconds. Defaults to 20.
    #[serde(default = "default_explicit_wait")]
    pub explicit_wait_secs: u64,

    /// Presence probe timeout, in seconds. Defaults to 2.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Page load budget, in seconds. Defaults to 10.
    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,
}

// ============================================================================
// Constructors
// ============================================================================

impl Config {
    /// Creates a configuration for the given platform with all defaults.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            app_package: None,
            app_activity: None,
            bundle_id: None,
            device_name: None,
            platform_version: None,
            automation_name: None,
            no_reset: true,
            auto_grant_permissions: true,
            auto_accept_alerts: true,
            implicit_wait_secs: DEFAULT_IMPLICIT_WAIT_SECS,
            explicit_wait_secs: DEFAULT_EXPLICIT_WAIT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
        }
    }

    /// Creates an Android configuration targeting the given package/activity.
    #[must_use]
    pub fn android(app_package: impl Into<String>, app_activity: impl Into<String>) -> Self {
        let mut config = Self::new(Platform::Android);
        config.app_package = Some(app_package.into());
        config.app_activity = Some(app_activity.into());
        config
    }

    /// Creates an iOS configuration targeting the given bundle.
    #[must_use]
    pub fn ios(bundle_id: impl Into<String>) -> Self {
        let mut config = Self::new(Platform::Ios);
        config.bundle_id = Some(bundle_id.into());
        config
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl Config {
    /// Sets the device name.
    #[inline]
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = Some(name.into());
        self
    }

    /// Sets the OS version.
    #[inline]
    #[must_use]
    pub fn with_platform_version(mut self, version: impl Into<String>) -> Self {
        self.platform_version = Some(version.into());
        self
    }

    /// Sets the automation engine.
    #[inline]
    #[must_use]
    pub fn with_automation_name(mut self, name: impl Into<String>) -> Self {
        self.automation_name = Some(name.into());
        self
    }

    /// Sets the app reset policy.
    #[inline]
    #[must_use]
    pub fn with_no_reset(mut self, no_reset: bool) -> Self {
        self.no_reset = no_reset;
        self
    }

    /// Sets the implicit wait, in seconds.
    #[inline]
    #[must_use]
    pub fn with_implicit_wait_secs(mut self, secs: u64) -> Self {
        self.implicit_wait_secs = secs;
        self
    }

    /// Sets the explicit wait, in seconds.
    #[inline]
    #[must_use]
    pub fn with_explicit_wait_secs(mut self, secs: u64) -> Self {
        self.explicit_wait_secs = secs;
        self
    }

    /// Sets the probe timeout, in seconds.
    #[inline]
    #[must_use]
    pub fn with_probe_timeout_secs(mut self, secs: u64) -> Self {
        self.probe_timeout_secs = secs;
        self
    }

    /// Sets the page load budget, in seconds.
    #[inline]
    #[must_use]
    pub fn with_page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Config {
    /// Returns the implicit wait as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Returns the explicit wait as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }

    /// Returns the probe timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Returns the page load budget as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_case_insensitive() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
    }

    #[test]
    fn test_platform_parse_rejects_unknown() {
        let err = "windows".parse::<Platform>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform { platform } if platform == "windows"));
    }

    #[test]
    fn test_android_constructor() {
        let config = Config::android("com.android.contacts", ".activities.PeopleActivity");
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.app_package.as_deref(), Some("com.android.contacts"));
        assert_eq!(
            config.app_activity.as_deref(),
            Some(".activities.PeopleActivity")
        );
        assert!(config.bundle_id.is_none());
    }

    #[test]
    fn test_default_timeouts() {
        let config = Config::ios("com.apple.MobileAddressBook");
        assert_eq!(config.implicit_wait(), Duration::from_secs(10));
        assert_eq!(config.explicit_wait(), Duration::from_secs(20));
        assert_eq!(config.probe_timeout(), Duration::from_secs(2));
        assert_eq!(config.page_load_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new(Platform::Android)
            .with_device_name("pixel-7")
            .with_platform_version("14")
            .with_explicit_wait_secs(5)
            .with_no_reset(false);

        assert_eq!(config.device_name.as_deref(), Some("pixel-7"));
        assert_eq!(config.platform_version.as_deref(), Some("14"));
        assert_eq!(config.explicit_wait(), Duration::from_secs(5));
        assert!(!config.no_reset);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "platform": "ios", "bundle_id": "com.apple.MobileAddressBook" }"#,
        )
        .unwrap();

        assert_eq!(config.platform, Platform::Ios);
        assert!(config.no_reset);
        assert!(config.auto_accept_alerts);
        assert_eq!(config.implicit_wait_secs, 10);
    }

    #[test]
    fn test_deserialize_rejects_unknown_platform() {
        let result = serde_json::from_str::<Config>(r#"{ "platform": "blackberry" }"#);
        assert!(result.is_err());
    }
}
