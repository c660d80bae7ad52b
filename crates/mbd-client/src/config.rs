//! Configuration for the mbd client
//!
//! Settings come from a host-provided lookup (`SettingsSource`) and are
//! validated once by [`Settings::resolve`]. The validated settings are then
//! turned into an immutable [`ClientConfig`] holding the base URL and the
//! full header set sent with every request.

use crate::error::{ApiError, ApiResult};
use indexmap::IndexMap;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;

/// Base URL of the Farcaster API
pub const DEFAULT_BASE_URL: &str = "https://api.mbd.xyz/v2/farcaster";

/// Default application name sent as `X-Title`
pub const DEFAULT_APP_NAME: &str = "eliza_mbd_plugin";

/// Default application URL sent as `HTTP-Referer`
pub const DEFAULT_APP_URL: &str = "https://docs.mbd.xyz/";

/// Settings key for the API key
pub const MBD_API_KEY: &str = "MBD_API_KEY";
/// Settings key for the application name
pub const MBD_APP_NAME: &str = "MBD_APP_NAME";
/// Settings key for the application URL
pub const MBD_APP_URL: &str = "MBD_APP_URL";
/// Settings key for the debug flag
pub const MBD_DEBUG: &str = "MBD_DEBUG";

const HTTP_REFERER: &str = "HTTP-Referer";
const X_TITLE: &str = "X-Title";

/// Key/value lookup provided by the host runtime
pub trait SettingsSource {
    /// Look up a setting by name
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// Reads settings from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Adapts a lookup closure, e.g. a host runtime's `getSetting`
#[derive(Debug, Clone, Copy)]
pub struct SettingsFn<F>(pub F);

impl<F: Fn(&str) -> Option<String>> SettingsSource for SettingsFn<F> {
    fn get_setting(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Validated settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API key; requests go out unauthenticated without one
    pub api_key: Option<String>,
    /// Application name, sent as `X-Title`
    pub app_name: String,
    /// Application URL, sent as `HTTP-Referer`
    pub app_url: String,
    /// Log outbound requests and inbound payloads
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            debug: false,
        }
    }
}

impl Settings {
    /// Resolve and validate settings from a host lookup
    ///
    /// Reads `MBD_API_KEY`, `MBD_APP_NAME`, `MBD_APP_URL` and `MBD_DEBUG`.
    /// Empty values count as absent. The debug flag is on only when the raw
    /// value is exactly `"true"`.
    pub fn resolve<S: SettingsSource + ?Sized>(source: &S) -> ApiResult<Self> {
        let api_key = lookup(source, MBD_API_KEY);
        let app_name = lookup(source, MBD_APP_NAME).unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let app_url = lookup(source, MBD_APP_URL).unwrap_or_else(|| DEFAULT_APP_URL.to_string());
        let debug = source.get_setting(MBD_DEBUG).as_deref() == Some("true");

        let settings = Self {
            api_key,
            app_name,
            app_url,
            debug,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> ApiResult<Self> {
        Self::resolve(&EnvSettings)
    }

    /// Validate the settings
    ///
    /// Name, URL and key are free-form strings; they only have to be
    /// sendable as header values.
    pub fn validate(&self) -> ApiResult<()> {
        check_header_value(MBD_APP_URL, &self.app_url)?;
        check_header_value(MBD_APP_NAME, &self.app_name)?;
        if let Some(ref key) = self.api_key {
            check_header_value(MBD_API_KEY, key)?;
        }

        Ok(())
    }
}

fn lookup<S: SettingsSource + ?Sized>(source: &S, key: &str) -> Option<String> {
    source.get_setting(key).filter(|v| !v.is_empty())
}

fn check_header_value(key: &str, value: &str) -> ApiResult<()> {
    HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|_| ApiError::invalid_setting(key, "contains characters not allowed in a header"))
}

/// Client configuration
///
/// Built once from [`Settings`]; never mutated field by field afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Headers sent with every request, in insertion order
    pub headers: IndexMap<String, String>,
    /// Application name
    pub app_name: String,
    /// Application URL
    pub app_url: String,
    /// API key
    pub api_key: Option<String>,
    /// Debug logging
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ClientConfig {
    /// Build the configuration from validated settings
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("accept".to_string(), "application/json".to_string());
        headers.insert(HTTP_REFERER.to_string(), settings.app_url.clone());
        headers.insert(X_TITLE.to_string(), settings.app_name.clone());

        if let Some(ref key) = settings.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {key}"));
        }

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers,
            app_name: settings.app_name.clone(),
            app_url: settings.app_url.clone(),
            api_key: settings.api_key.clone(),
            debug: settings.debug,
        }
    }

    /// Resolve settings from a host lookup and build the configuration
    pub fn resolve<S: SettingsSource + ?Sized>(source: &S) -> ApiResult<Self> {
        Settings::resolve(source).map(|s| Self::from_settings(&s))
    }

    /// Create configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::resolve(&EnvSettings)
    }

    /// Builder-style method to point the client at another host
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether requests carry an `Authorization` header
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        Ok(())
    }
}
