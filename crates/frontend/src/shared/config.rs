//! Client configuration
//!
//! An embedded TOML default, overridable at runtime through local storage so
//! a deployed bundle can be pointed at another API server without a rebuild.

use crate::shared::storage;
use serde::Deserialize;

/// Local storage key holding an explicit API base URL
pub const API_BASE_OVERRIDE_KEY: &str = "api_base_url";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full base URL, e.g. `https://inventory.example.com`. Wins over `port`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Port of the API server on the page's host. Same origin when absent.
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_panel")]
    pub default_panel: String,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_page_size() -> usize {
    25
}

fn default_panel() -> String {
    "details".to_string()
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 8000

[ui]
log_level = "debug"
page_size = 25
default_panel = "details"
"#;

impl UiConfig {
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" | "warning" => log::Level::Warn,
            "info" => log::Level::Info,
            "trace" => log::Level::Trace,
            _ => log::Level::Debug,
        }
    }
}

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Base URL of the API server, without a trailing slash
    pub fn api_base(&self) -> String {
        if let Some(base) = self.api.base_url.as_deref().filter(|b| !b.trim().is_empty()) {
            return base.trim().trim_end_matches('/').to_string();
        }
        let (protocol, hostname, origin) = window_location();
        resolve_api_base(&protocol, &hostname, &origin, self.api.port)
    }
}

/// Pure part of `api_base`: explicit port on the page host, or same origin
fn resolve_api_base(protocol: &str, hostname: &str, origin: &str, port: Option<u16>) -> String {
    match port {
        Some(port) if !hostname.is_empty() => format!("{}//{}:{}", protocol, hostname, port),
        _ => origin.trim_end_matches('/').to_string(),
    }
}

fn window_location() -> (String, String, String) {
    let Some(window) = web_sys::window() else {
        return (String::new(), String::new(), String::new());
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    let origin = location.origin().unwrap_or_default();
    (protocol, hostname, origin)
}

/// Load the configuration: embedded default, then the local storage override
pub fn load_config() -> AppConfig {
    let mut config = match AppConfig::parse(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // the embedded default is covered by tests, this is unreachable in practice
            log::error!("embedded config is invalid: {}", e);
            AppConfig {
                api: ApiConfig {
                    base_url: None,
                    port: None,
                },
                ui: UiConfig {
                    log_level: default_log_level(),
                    page_size: default_page_size(),
                    default_panel: default_panel(),
                },
            }
        }
    };

    if let Some(base) = storage::get_item(API_BASE_OVERRIDE_KEY).filter(|b| !b.trim().is_empty()) {
        config.api.base_url = Some(base);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, Some(8000));
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.ui.default_panel, "details");
        assert_eq!(config.ui.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_ui_defaults_when_missing() {
        let config = AppConfig::parse("[api]\n[ui]\n").unwrap();
        assert_eq!(config.api.port, None);
        assert_eq!(config.ui.page_size, 25);
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = AppConfig::parse(
            "[api]\nbase_url = \"https://inv.example.com/\"\nport = 9000\n[ui]\n",
        )
        .unwrap();
        assert_eq!(config.api_base(), "https://inv.example.com");
    }

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(
            resolve_api_base("https:", "inv.local", "https://inv.local", Some(8000)),
            "https://inv.local:8000"
        );
        assert_eq!(
            resolve_api_base("https:", "inv.local", "https://inv.local/", None),
            "https://inv.local"
        );
    }

    #[test]
    fn test_log_level_names() {
        let mut config = AppConfig::parse(DEFAULT_CONFIG).unwrap();
        config.ui.log_level = "WARN".into();
        assert_eq!(config.ui.log_level(), log::Level::Warn);
        config.ui.log_level = "nonsense".into();
        assert_eq!(config.ui.log_level(), log::Level::Debug);
    }
}
