//! YAML configuration loading.
//!
//! The config file carries three sections: `uopeople` (portal credentials),
//! `ifttt` (webhook parameters), and an optional `harvest` section with
//! scraping policy knobs. Loaded once at startup, immutable for the run.

use crate::error::HarvestError;
use serde::Deserialize;
use std::path::Path;

/// Default config file name, next to the binary's working directory.
pub const DEFAULT_CONFIG_PATH: &str = "uopeople.config.yml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub uopeople: PortalConfig,
    pub ifttt: WebhookConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// Portal login parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub moodle_login_url: String,
    pub username: String,
    pub password: String,
}

/// IFTTT Maker webhook parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    pub maker_channel_event: String,
    pub maker_channel_key: String,
    /// Dry-run mode: log every item but never POST.
    #[serde(default)]
    pub skip_sending: bool,
    /// Overridable for tests; the real service lives at maker.ifttt.com.
    #[serde(default = "default_maker_base_url")]
    pub maker_base_url: String,
}

/// What to do when a course page lacks an expected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Log a warning and move on to the next course.
    Skip,
    /// Abort the whole run.
    Fail,
}

/// Scraping policy knobs. Every field has a default, so the whole
/// section may be omitted from the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub on_missing: MissingPolicy,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Courses whose title contains any of these substrings
    /// (case-insensitive) are not real coursework and are skipped.
    pub excluded_courses: Vec<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            on_missing: MissingPolicy::Skip,
            timeout_ms: 30_000,
            excluded_courses: vec![
                "peer assessment".to_string(),
                "student writing center".to_string(),
            ],
        }
    }
}

fn default_maker_base_url() -> String {
    "https://maker.ifttt.com".to_string()
}

impl Config {
    /// Load and parse the config file. Missing or unreadable files are
    /// fatal; there is nothing useful the harvester can do without one.
    pub fn load(path: &Path) -> Result<Config, HarvestError> {
        let raw = std::fs::read_to_string(path).map_err(|e| HarvestError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&raw).map_err(|e| HarvestError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
