//! Error taxonomy for the harvester.
//!
//! Fatal vs. recoverable is a policy decision made by the caller: config
//! and auth errors always abort, navigation and title errors abort only
//! when `harvest.on_missing = fail`, relay errors never abort the run.

use thiserror::Error;

/// Every way a harvest run can go wrong.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Config file missing, unreadable, or unparseable.
    #[error("config file {path}: {reason}")]
    Config { path: String, reason: String },

    /// Login form submitted but the portal rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An expected page element (form, link, section) was not found.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Course title too short to derive a short code from.
    #[error("malformed course title {title:?}: expected at least two words")]
    MalformedTitle { title: String },

    /// Webhook answered with a non-200 status for one item.
    #[error("webhook returned status {status} for {item:?}")]
    Relay { status: u16, item: String },

    /// Transport-level HTTP failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl HarvestError {
    /// Whether the `on_missing` policy applies to this error.
    ///
    /// Only per-course scraping problems are candidates for skip-and-continue;
    /// everything else is fatal regardless of policy.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            HarvestError::Navigation(_) | HarvestError::MalformedTitle { .. }
        )
    }
}
