//! # Client configuration (`viiveo.toml`)
//!
//! Defines the TOML configuration the web client is built with. Every field has
//! a default, so a missing or empty file is equivalent to the default
//! configuration.
//!
//! ## Structure
//!
//! ```toml
//! debug = true
//!
//! [api]
//! base_url = "https://gaetano1747.gm-harchies.workers.dev"
//! timeout_secs = 15
//! demo = false          # serve missions from the in-process demo backend
//! demo_delay_ms = 800
//!
//! [notice]
//! duration_ms = 3000
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `viiveo.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Log at `DEBUG` instead of `INFO`.
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notice: NoticeConfig,
}

/// Remote API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline for a single API call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Use the in-process demo backend instead of the remote API.
    #[serde(default)]
    pub demo: bool,
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,
}

/// Status notice settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_notice_duration_ms")]
    pub duration_ms: u64,
}

fn default_debug() -> bool {
    true
}

fn default_base_url() -> String {
    "https://gaetano1747.gm-harchies.workers.dev".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_demo_delay_ms() -> u64 {
    800
}

fn default_notice_duration_ms() -> u64 {
    3000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: default_debug(),
            api: ApiConfig::default(),
            notice: NoticeConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            demo: false,
            demo_delay_ms: default_demo_delay_ms(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notice_duration_ms(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "viiveo.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }
}

impl NoticeConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
