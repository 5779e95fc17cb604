use crate::error::ConfigError;
use crate::i18n::Language;
use crate::layout::LayoutPreset;
use crate::pipeline::FetchMode;
use crate::source::SourceKind;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_ROUTING_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_LOG_FILE: &str = "forensic-dash.log";
const DEFAULT_STEP_DELAY_MS: u64 = 800;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub routing_url: String,
    pub source: SourceKind,
    pub language: Language,
    pub layout: LayoutPreset,
    pub fetch_mode: FetchMode,
    pub step_delay: Duration,
    pub http_timeout: Duration,
    pub routing_enabled: bool,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            routing_url: DEFAULT_ROUTING_URL.to_string(),
            source: SourceKind::Mock,
            language: Language::Ar,
            layout: LayoutPreset::Classic,
            fetch_mode: FetchMode::Concurrent,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            routing_enabled: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = value("FORENSIC_API_URL").map_or(defaults.api_url, |url| trim_url(&url));
        let routing_url =
            value("FORENSIC_ROUTING_URL").map_or(defaults.routing_url, |url| trim_url(&url));

        let source = match value("FORENSIC_SOURCE") {
            Some(raw) => SourceKind::parse(&raw).ok_or_else(|| invalid(
                "FORENSIC_SOURCE",
                raw,
                "mock, analyze or recognize",
            ))?,
            None => defaults.source,
        };

        let language = match value("FORENSIC_LANGUAGE") {
            Some(raw) => {
                Language::parse(&raw).ok_or_else(|| invalid("FORENSIC_LANGUAGE", raw, "ar or en"))?
            }
            None => defaults.language,
        };

        let layout = match value("FORENSIC_LAYOUT") {
            Some(raw) => LayoutPreset::parse(&raw).ok_or_else(|| invalid(
                "FORENSIC_LAYOUT",
                raw,
                "classic, investigation or full",
            ))?,
            None => defaults.layout,
        };

        let fetch_mode = match value("FORENSIC_FETCH_MODE") {
            Some(raw) => FetchMode::parse(&raw).ok_or_else(|| invalid(
                "FORENSIC_FETCH_MODE",
                raw,
                "sequential or concurrent",
            ))?,
            None => defaults.fetch_mode,
        };

        let step_delay = match value("FORENSIC_STEP_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_number("FORENSIC_STEP_DELAY_MS", raw)?),
            None => defaults.step_delay,
        };

        let http_timeout = match value("FORENSIC_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("FORENSIC_HTTP_TIMEOUT_SECS", raw)?),
            None => defaults.http_timeout,
        };

        let routing_enabled = match value("FORENSIC_ROUTING") {
            Some(raw) => parse_switch("FORENSIC_ROUTING", raw)?,
            None => defaults.routing_enabled,
        };

        let log_file = value("FORENSIC_LOG_FILE").map_or(defaults.log_file, PathBuf::from);

        Ok(Self {
            api_url,
            routing_url,
            source,
            language,
            layout,
            fetch_mode,
            step_delay,
            http_timeout,
            routing_enabled,
            log_file,
        })
    }

    /// Shared HTTP client for the analysis backend and the routing service.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!("forensic-dash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

fn trim_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn invalid(key: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value,
        expected,
    }
}

fn parse_number(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(key, raw, "a non-negative integer"))
}

fn parse_switch(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Ok(true),
        "0" | "off" | "false" | "no" => Ok(false),
        _ => Err(invalid(key, raw, "on or off")),
    }
}
