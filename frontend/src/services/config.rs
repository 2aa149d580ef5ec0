//! Build-time configuration.
//!
//! Values are baked in by `option_env!` when the wasm bundle is compiled,
//! e.g. `EXPENSE_TRACKER_API_URL=https://example.org/api trunk build`.
//! Invalid values fall back to the defaults; the reasons are returned so
//! they can be logged once the logger is up.

use log::LevelFilter;
use shared::DisplayLocale;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every REST path is appended to
    pub api_url: String,
    pub locale: DisplayLocale,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: DisplayLocale::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> (Self, Vec<String>) {
        Self::from_values(
            option_env!("EXPENSE_TRACKER_API_URL"),
            option_env!("EXPENSE_TRACKER_LOCALE"),
            option_env!("EXPENSE_TRACKER_LOG"),
        )
    }

    pub fn from_values(
        api_url: Option<&str>,
        locale: Option<&str>,
        log_level: Option<&str>,
    ) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
            if url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/') {
                config.api_url = url.trim_end_matches('/').to_string();
            } else {
                warnings.push(format!(
                    "Ignoring EXPENSE_TRACKER_API_URL {:?}: not an http(s) URL or absolute path",
                    url
                ));
            }
        }

        if let Some(value) = locale {
            match value.parse::<DisplayLocale>() {
                Ok(locale) => config.locale = locale,
                Err(e) => warnings.push(format!("Ignoring EXPENSE_TRACKER_LOCALE: {}", e)),
            }
        }

        if let Some(value) = log_level {
            match value.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => warnings.push(format!("Ignoring EXPENSE_TRACKER_LOG {:?}: unknown level", value)),
            }
        }

        (config, warnings)
    }
}
